//! Execution preparation: freshness gate plus projection of transaction fields

use qp_types::{ExecutionPayload, Quote, QuoteExpiredError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};

#[derive(Debug, Error)]
pub enum ExecutionError {
	#[error("Quote expired, please refresh")]
	QuoteExpired(#[from] QuoteExpiredError),
}

/// Turns a previously issued quote into a signable payload
///
/// No chain re-validation and no signing happen here.
#[derive(Clone)]
pub struct ExecutionPreparer {
	clock: Arc<dyn Clock>,
}

impl ExecutionPreparer {
	pub fn new(clock: Arc<dyn Clock>) -> Self {
		Self { clock }
	}

	pub fn prepare(&self, quote: &Quote) -> Result<ExecutionPayload, ExecutionError> {
		self.prepare_at(quote, self.clock.now_ms())
	}

	pub fn prepare_at(&self, quote: &Quote, now_ms: i64) -> Result<ExecutionPayload, ExecutionError> {
		quote.ensure_fresh_at(now_ms).map_err(|e| {
			warn!(
				valid_until = e.valid_until,
				now = e.now,
				"Rejected expired quote"
			);
			e
		})?;

		debug!(to = %quote.upstream.transaction.to, "Prepared swap transaction");
		Ok(ExecutionPayload::from(quote))
	}
}

impl Default for ExecutionPreparer {
	fn default() -> Self {
		Self::new(Arc::new(SystemClock))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::clock::MockClock;
	use qp_types::UpstreamQuote;
	use serde_json::json;

	const ISSUED_AT: i64 = 1_735_000_000_000;

	fn quote(transaction: serde_json::Value) -> Quote {
		let upstream: UpstreamQuote = serde_json::from_value(json!({
			"sellAmount": "1000000000000000",
			"buyAmount": "2512340",
			"allowanceTarget": null,
			"transaction": transaction,
			"route": { "fills": [{ "source": "Uniswap_V3", "proportionBps": "10000" }] }
		}))
		.unwrap();
		Quote::stamp(upstream, 8, ISSUED_AT, 30_000)
	}

	fn native_sell_quote() -> Quote {
		quote(json!({
			"to": "0x0000000000001fF3684f28c67538d4D072C22734",
			"data": "0x2213bc0b",
			"gas": "180000",
			"gasPrice": "6000000",
			"value": "1000000000000000"
		}))
	}

	fn preparer_at(now_ms: i64) -> ExecutionPreparer {
		let mut clock = MockClock::new();
		clock.expect_now_ms().return_const(now_ms);
		ExecutionPreparer::new(Arc::new(clock))
	}

	#[test]
	fn test_prepare_just_before_expiry_succeeds() {
		let quote = native_sell_quote();
		let payload = preparer_at(quote.valid_until - 1).prepare(&quote).unwrap();

		assert!(payload.success);
		assert_eq!(payload.to, "0x0000000000001fF3684f28c67538d4D072C22734");
		assert_eq!(payload.data, "0x2213bc0b");
		assert_eq!(payload.value, "1000000000000000");
		assert_eq!(payload.gas.as_deref(), Some("180000"));
		assert_eq!(payload.gas_price.as_deref(), Some("6000000"));
		assert_eq!(payload.allowance_target, None);
		assert_eq!(payload.buy_amount.as_str(), "2512340");
		assert_eq!(payload.sell_amount.as_str(), "1000000000000000");
	}

	#[test]
	fn test_prepare_at_valid_until_succeeds() {
		let quote = native_sell_quote();
		assert!(preparer_at(quote.valid_until).prepare(&quote).is_ok());
	}

	#[test]
	fn test_prepare_just_after_expiry_fails() {
		let quote = native_sell_quote();
		let error = preparer_at(quote.valid_until + 1).prepare(&quote).unwrap_err();

		let ExecutionError::QuoteExpired(expired) = error;
		assert_eq!(expired.valid_until, ISSUED_AT + 30_000);
		assert_eq!(expired.now, ISSUED_AT + 30_001);
	}

	#[test]
	fn test_missing_value_defaults_to_zero() {
		let quote = quote(json!({ "to": "0xabc", "data": "0x" }));
		let payload = preparer_at(ISSUED_AT).prepare(&quote).unwrap();
		assert_eq!(payload.value, "0");
		assert_eq!(payload.gas, None);
	}

	#[test]
	fn test_expired_error_message() {
		let quote = native_sell_quote();
		let error = preparer_at(quote.valid_until + 1).prepare(&quote).unwrap_err();
		assert_eq!(error.to_string(), "Quote expired, please refresh");
	}
}
