//! Quote handlers

use axum::{
	extract::{rejection::JsonRejection, State},
	response::Json,
};
use qp_types::{FreshExecutionPayload, Quote, SwapRequest};
use tracing::info;

use crate::handlers::common::{invalid_body, service_error, ApiError};
use crate::state::AppState;

/// POST /quote - Cached quote with the platform fee applied
pub async fn post_quote(
	State(state): State<AppState>,
	body: Result<Json<SwapRequest>, JsonRejection>,
) -> Result<Json<Quote>, ApiError> {
	let Json(request) = body.map_err(invalid_body)?;
	info!(
		"Quote request: {} {} -> {} for {}",
		request.sell_amount, request.sell_token, request.buy_token, request.taker
	);

	state
		.quote_service
		.get_quote(&request)
		.await
		.map(Json)
		.map_err(|e| service_error(e, "Failed to get quote"))
}

/// POST /quote-and-execute - Fresh quote straight to a signable transaction
pub async fn post_quote_and_execute(
	State(state): State<AppState>,
	body: Result<Json<SwapRequest>, JsonRejection>,
) -> Result<Json<FreshExecutionPayload>, ApiError> {
	let Json(request) = body.map_err(invalid_body)?;
	info!(
		"Quote-and-execute request: {} {} -> {} for {}",
		request.sell_amount, request.sell_token, request.buy_token, request.taker
	);

	state
		.quote_service
		.quote_and_execute(&request)
		.await
		.map(Json)
		.map_err(|e| service_error(e, "Failed to get fresh quote for execution"))
}
