//! Quote domain model: the upstream quote plus the proxy's stamps

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::U256;

pub mod errors;

pub use errors::QuoteExpiredError;

/// Unsigned transaction embedded in an upstream quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTransaction {
	pub to: String,
	pub data: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_price: Option<String>,
	/// Any other transaction fields the aggregator returns
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Quote body as returned by the upstream aggregator
///
/// Only the fields the proxy reads are typed; everything else is kept in
/// `extra` and echoed back to the client untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamQuote {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sell_token: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub buy_token: Option<String>,
	pub sell_amount: U256,
	pub buy_amount: U256,
	/// Contract the taker must approve for the sell token (null for native sells)
	#[serde(default)]
	pub allowance_target: Option<String>,
	pub transaction: QuoteTransaction,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Quote envelope handed to clients and held by the cache
///
/// Timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	#[serde(flatten)]
	pub upstream: UpstreamQuote,
	pub valid_until: i64,
	pub fee_bps: u16,
	pub cached_at: i64,
}

impl Quote {
	/// Stamp an upstream quote issued at `now_ms`
	pub fn stamp(upstream: UpstreamQuote, fee_bps: u16, now_ms: i64, validity_ms: i64) -> Self {
		Self {
			upstream,
			valid_until: now_ms.saturating_add(validity_ms),
			fee_bps,
			cached_at: now_ms,
		}
	}

	/// A quote stays usable up to and including `validUntil`
	pub fn is_expired_at(&self, now_ms: i64) -> bool {
		now_ms > self.valid_until
	}

	pub fn ensure_fresh_at(&self, now_ms: i64) -> Result<(), QuoteExpiredError> {
		if self.is_expired_at(now_ms) {
			return Err(QuoteExpiredError {
				valid_until: self.valid_until,
				now: now_ms,
			});
		}
		Ok(())
	}
}
