//! Error types for quote lifecycle checks

use thiserror::Error;

/// A client presented a quote past its `validUntil`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Quote expired at {valid_until} (now {now})")]
pub struct QuoteExpiredError {
	pub valid_until: i64,
	pub now: i64,
}
