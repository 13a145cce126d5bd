//! Quote service
//!
//! Normalize, look up the cache, call the aggregator on a miss, stamp and
//! store the result.

use async_trait::async_trait;
use qp_storage::QuoteCache;
use qp_types::{
	FeePolicy, FetchOptions, FreshExecutionPayload, NormalizedSwapRequest, Quote, QuoteAdapter,
	SwapRequest, SwapValidationError, UpstreamQuote, UpstreamQuoteError,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::execution::{ExecutionError, ExecutionPreparer};
use crate::normalizer::TokenNormalizer;

#[derive(Debug, Error)]
pub enum QuoteServiceError {
	#[error("Invalid swap request: {0}")]
	Validation(#[from] SwapValidationError),

	#[error("Upstream quote failed: {0}")]
	Upstream(#[from] UpstreamQuoteError),

	#[error(transparent)]
	Execution(#[from] ExecutionError),
}

#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
	/// Quote through the cache
	async fn get_quote(&self, request: &SwapRequest) -> Result<Quote, QuoteServiceError>;

	/// Fresh quote straight into a signable payload, bypassing the cache
	async fn quote_and_execute(
		&self,
		request: &SwapRequest,
	) -> Result<FreshExecutionPayload, QuoteServiceError>;

	fn fee_bps(&self) -> u16;
}

/// Tunables for [`QuoteService`]
#[derive(Debug, Clone)]
pub struct QuoteServiceOptions {
	pub normalizer: TokenNormalizer,
	/// How long an issued quote stays preparable
	pub validity: Duration,
	pub quote_timeout: Duration,
	pub execute_timeout: Duration,
}

impl Default for QuoteServiceOptions {
	fn default() -> Self {
		Self {
			normalizer: TokenNormalizer::default(),
			validity: Duration::from_secs(30),
			quote_timeout: Duration::from_millis(3_000),
			execute_timeout: Duration::from_millis(2_000),
		}
	}
}

#[derive(Clone)]
pub struct QuoteService {
	adapter: Arc<dyn QuoteAdapter>,
	cache: Arc<dyn QuoteCache>,
	fee_policy: FeePolicy,
	normalizer: TokenNormalizer,
	preparer: ExecutionPreparer,
	clock: Arc<dyn Clock>,
	validity_ms: i64,
	quote_options: FetchOptions,
	execute_options: FetchOptions,
}

impl QuoteService {
	pub fn new(
		adapter: Arc<dyn QuoteAdapter>,
		cache: Arc<dyn QuoteCache>,
		fee_policy: FeePolicy,
		options: QuoteServiceOptions,
	) -> Self {
		Self::with_clock(adapter, cache, fee_policy, options, Arc::new(SystemClock))
	}

	pub fn with_clock(
		adapter: Arc<dyn QuoteAdapter>,
		cache: Arc<dyn QuoteCache>,
		fee_policy: FeePolicy,
		options: QuoteServiceOptions,
		clock: Arc<dyn Clock>,
	) -> Self {
		Self {
			adapter,
			cache,
			fee_policy,
			normalizer: options.normalizer,
			preparer: ExecutionPreparer::new(clock.clone()),
			clock,
			validity_ms: i64::try_from(options.validity.as_millis()).unwrap_or(i64::MAX),
			quote_options: FetchOptions {
				timeout: options.quote_timeout,
			},
			execute_options: FetchOptions {
				timeout: options.execute_timeout,
			},
		}
	}

	/// Preparer sharing this service's clock
	pub fn execution_preparer(&self) -> ExecutionPreparer {
		self.preparer.clone()
	}

	pub fn fee_policy(&self) -> &FeePolicy {
		&self.fee_policy
	}

	async fn fetch_upstream(
		&self,
		request: &NormalizedSwapRequest,
		options: &FetchOptions,
	) -> Result<UpstreamQuote, UpstreamQuoteError> {
		let fee = self.fee_policy.params_for(&request.buy_token);
		self.adapter
			.fetch_quote(request, &fee, options)
			.await
			.map_err(|e| {
				warn!(adapter = self.adapter.id(), "Upstream quote failed: {}", e);
				e
			})
	}
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
	async fn get_quote(&self, request: &SwapRequest) -> Result<Quote, QuoteServiceError> {
		let normalized = self.normalizer.normalize(request)?;
		let key = normalized.cache_key();

		if let Some(quote) = self.cache.get_at(&key, self.clock.now_ms()) {
			debug!(key = %key, "Quote cache hit");
			return Ok(quote);
		}
		debug!(key = %key, "Quote cache miss");

		let upstream = self
			.fetch_upstream(&normalized, &self.quote_options)
			.await?;

		let now = self.clock.now_ms();
		let quote = Quote::stamp(upstream, self.fee_policy.fee_bps(), now, self.validity_ms);
		self.cache.put_at(key, quote.clone(), now);

		info!(
			sell_token = %normalized.sell_token,
			buy_token = %normalized.buy_token,
			sell_amount = %normalized.sell_amount,
			buy_amount = %quote.upstream.buy_amount,
			"Issued quote"
		);
		Ok(quote)
	}

	async fn quote_and_execute(
		&self,
		request: &SwapRequest,
	) -> Result<FreshExecutionPayload, QuoteServiceError> {
		let normalized = self.normalizer.normalize(request)?;

		let upstream = self
			.fetch_upstream(&normalized, &self.execute_options)
			.await?;

		let now = self.clock.now_ms();
		let quote = Quote::stamp(upstream, self.fee_policy.fee_bps(), now, self.validity_ms);
		let payload = self.preparer.prepare_at(&quote, now)?;

		info!(
			sell_token = %normalized.sell_token,
			buy_token = %normalized.buy_token,
			buy_amount = %payload.buy_amount,
			"Prepared fresh swap"
		);

		Ok(FreshExecutionPayload {
			payload,
			sell_token: quote
				.upstream
				.sell_token
				.or(Some(normalized.sell_token)),
			fresh_quote: true,
			timestamp: now,
		})
	}

	fn fee_bps(&self) -> u16 {
		self.fee_policy.fee_bps()
	}
}
