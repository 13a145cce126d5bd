//! Error body and status mapping shared by handlers

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Json};
use qp_service::{ExecutionError, QuoteServiceError};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const INVALID_REQUEST: &str = "Invalid request";
pub const QUOTE_EXPIRED: &str = "Quote expired, please refresh";

/// Error response format shared by handlers
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub details: Option<String>,
	/// Epoch milliseconds
	pub timestamp: i64,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, error: &str, details: Option<String>) -> ApiError {
	(
		status,
		Json(ErrorResponse {
			error: error.to_string(),
			details,
			timestamp: chrono::Utc::now().timestamp_millis(),
		}),
	)
}

/// Unparseable bodies are a client error, not the framework's 422
pub fn invalid_body(rejection: JsonRejection) -> ApiError {
	warn!("Rejected request body: {}", rejection.body_text());
	api_error(
		StatusCode::BAD_REQUEST,
		INVALID_REQUEST,
		Some(rejection.body_text()),
	)
}

pub fn expired(error: &ExecutionError) -> ApiError {
	warn!("{}", error);
	api_error(StatusCode::BAD_REQUEST, QUOTE_EXPIRED, None)
}

/// Map a service failure; `upstream_context` names the failed operation
pub fn service_error(error: QuoteServiceError, upstream_context: &str) -> ApiError {
	match error {
		QuoteServiceError::Validation(e) => {
			api_error(StatusCode::BAD_REQUEST, INVALID_REQUEST, Some(e.to_string()))
		},
		QuoteServiceError::Execution(e) => expired(&e),
		QuoteServiceError::Upstream(e) => api_error(
			StatusCode::INTERNAL_SERVER_ERROR,
			upstream_context,
			Some(e.to_string()),
		),
	}
}
