use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
	pub status: String,
	pub fee_bps: u16,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok".to_string(),
		fee_bps: state.quote_service.fee_bps(),
	})
}
