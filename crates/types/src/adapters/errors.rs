//! Error types for upstream aggregator calls

use thiserror::Error;

/// Every way an upstream quote call can fail
///
/// Surfaced to clients as a 500 with `details()` attached.
#[derive(Error, Debug)]
pub enum UpstreamQuoteError {
	#[error("Upstream request timed out after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {body}")]
	HttpStatusError { status_code: u16, body: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String, body: String },

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },
}

impl UpstreamQuoteError {
	/// Upstream HTTP status, when the aggregator answered at all
	pub fn status_code(&self) -> Option<u16> {
		match self {
			UpstreamQuoteError::HttpStatusError { status_code, .. } => Some(*status_code),
			UpstreamQuoteError::HttpError(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Raw upstream body, when one was received
	pub fn upstream_body(&self) -> Option<&str> {
		match self {
			UpstreamQuoteError::HttpStatusError { body, .. }
			| UpstreamQuoteError::InvalidResponse { body, .. } => Some(body.as_str()),
			_ => None,
		}
	}

	pub fn http_failure(status_code: u16, body: impl Into<String>) -> Self {
		Self::HttpStatusError {
			status_code,
			body: body.into(),
		}
	}
}
