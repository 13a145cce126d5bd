//! In-process fakes for tests and demos
//!
//! `MockQuoteAdapter` stands in for the upstream aggregator and records every
//! call it receives; `ManualClock` lets tests move time explicitly.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use qp_service::Clock;
use qp_types::serde_json::json;
use qp_types::{
	FeeParams, FetchOptions, NormalizedSwapRequest, QuoteAdapter, UpstreamQuote,
	UpstreamQuoteError, UpstreamResult,
};

/// Settlement contract 0x returns for allowance-holder quotes on Base
pub const MOCK_SETTLER: &str = "0x0000000000001fF3684f28c67538d4D072C22734";

/// One upstream call as the adapter saw it
#[derive(Debug, Clone)]
pub struct RecordedCall {
	pub request: NormalizedSwapRequest,
	pub fee: FeeParams,
	pub options: FetchOptions,
}

#[derive(Debug, Clone)]
enum MockBehavior {
	Succeed { buy_amount: String },
	FailStatus { status: u16, body: String },
	Hang,
}

/// Fake aggregator answering with a deterministic quote
///
/// Clones share the call log, so a test can keep one handle and pass another
/// to the builder.
#[derive(Debug, Clone)]
pub struct MockQuoteAdapter {
	behavior: MockBehavior,
	delay: Option<Duration>,
	calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockQuoteAdapter {
	pub fn new() -> Self {
		Self::with_buy_amount("2512340")
	}

	pub fn with_buy_amount(buy_amount: impl Into<String>) -> Self {
		Self {
			behavior: MockBehavior::Succeed {
				buy_amount: buy_amount.into(),
			},
			delay: None,
			calls: Arc::new(Mutex::new(Vec::new())),
		}
	}

	/// Answer every call with a non-2xx status and body
	pub fn failing(status: u16, body: impl Into<String>) -> Self {
		Self {
			behavior: MockBehavior::FailStatus {
				status,
				body: body.into(),
			},
			..Self::new()
		}
	}

	/// Never answer; the call ends when the caller's timeout fires
	pub fn hanging() -> Self {
		Self {
			behavior: MockBehavior::Hang,
			..Self::new()
		}
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls
			.lock()
			.map(|calls| calls.clone())
			.unwrap_or_default()
	}

	pub fn call_count(&self) -> usize {
		self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
	}

	fn quote_for(request: &NormalizedSwapRequest, buy_amount: &str) -> UpstreamResult<UpstreamQuote> {
		let body = json!({
			"blockNumber": "24150000",
			"buyAmount": buy_amount,
			"buyToken": request.buy_token,
			"sellAmount": request.sell_amount.as_str(),
			"sellToken": request.sell_token,
			"allowanceTarget": null,
			"liquidityAvailable": true,
			"minBuyAmount": buy_amount,
			"route": {
				"fills": [{ "from": request.sell_token, "to": request.buy_token, "source": "Uniswap_V3", "proportionBps": "10000" }]
			},
			"transaction": {
				"to": MOCK_SETTLER,
				"data": "0x2213bc0b00000000000000000000000000000000000000000000000000000000",
				"gas": "181250",
				"gasPrice": "6010000",
				"value": request.sell_amount.as_str()
			}
		});

		qp_types::serde_json::from_value(body).map_err(|e| UpstreamQuoteError::InvalidResponse {
			reason: e.to_string(),
			body: String::new(),
		})
	}
}

impl Default for MockQuoteAdapter {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl QuoteAdapter for MockQuoteAdapter {
	fn id(&self) -> &str {
		"mock-aggregator"
	}

	async fn fetch_quote(
		&self,
		request: &NormalizedSwapRequest,
		fee: &FeeParams,
		options: &FetchOptions,
	) -> UpstreamResult<UpstreamQuote> {
		if let Ok(mut calls) = self.calls.lock() {
			calls.push(RecordedCall {
				request: request.clone(),
				fee: fee.clone(),
				options: *options,
			});
		}

		let exchange = async {
			if let Some(delay) = self.delay {
				tokio::time::sleep(delay).await;
			}
			match &self.behavior {
				MockBehavior::Succeed { buy_amount } => Self::quote_for(request, buy_amount),
				MockBehavior::FailStatus { status, body } => {
					Err(UpstreamQuoteError::http_failure(*status, body.clone()))
				},
				MockBehavior::Hang => std::future::pending().await,
			}
		};

		tokio::time::timeout(options.timeout, exchange)
			.await
			.unwrap_or(Err(UpstreamQuoteError::Timeout {
				timeout_ms: options.timeout_ms(),
			}))
	}
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
	now_ms: AtomicI64,
}

impl ManualClock {
	pub fn new(now_ms: i64) -> Self {
		Self {
			now_ms: AtomicI64::new(now_ms),
		}
	}

	pub fn advance(&self, by: Duration) {
		self.now_ms
			.fetch_add(by.as_millis() as i64, Ordering::SeqCst);
	}

	pub fn set(&self, now_ms: i64) {
		self.now_ms.store(now_ms, Ordering::SeqCst);
	}
}

impl Clock for ManualClock {
	fn now_ms(&self) -> i64 {
		self.now_ms.load(Ordering::SeqCst)
	}
}
