//! Upstream aggregator seam: trait, call options and errors

use std::time::Duration;

pub mod errors;
pub mod traits;

pub use errors::UpstreamQuoteError;
pub use traits::QuoteAdapter;

/// Result type for upstream calls
pub type UpstreamResult<T> = Result<T, UpstreamQuoteError>;

/// Per-call options chosen by the calling endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
	/// Hard bound on the whole upstream exchange, including waiting for a pool slot
	pub timeout: Duration,
}

impl FetchOptions {
	pub fn with_timeout_ms(timeout_ms: u64) -> Self {
		Self {
			timeout: Duration::from_millis(timeout_ms),
		}
	}

	pub fn timeout_ms(&self) -> u64 {
		self.timeout.as_millis() as u64
	}
}
