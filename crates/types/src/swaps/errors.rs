//! Error types for swap request validation

use thiserror::Error;

/// Reasons a swap request is rejected before any upstream call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapValidationError {
	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Invalid amount: {field} - {reason}")]
	InvalidAmount { field: String, reason: String },

	#[error("sellToken and buyToken resolve to the same asset: {token}")]
	SameToken { token: String },
}
