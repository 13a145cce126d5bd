//! Swap preparation handler

use axum::{
	extract::{rejection::JsonRejection, State},
	response::Json,
};
use qp_types::{ExecutionPayload, Quote};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::handlers::common::{expired, invalid_body, ApiError};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct PrepareSwapRequest {
	pub quote: Quote,
}

/// POST /prepare-swap - Re-emit a fresh quote's transaction for signing
pub async fn post_prepare_swap(
	State(state): State<AppState>,
	body: Result<Json<PrepareSwapRequest>, JsonRejection>,
) -> Result<Json<ExecutionPayload>, ApiError> {
	let Json(PrepareSwapRequest { quote }) = body.map_err(invalid_body)?;

	let payload = state
		.execution_preparer
		.prepare(&quote)
		.map_err(|e| expired(&e))?;

	info!("Prepared swap to {} valid until {}", payload.to, quote.valid_until);
	Ok(Json(payload))
}
