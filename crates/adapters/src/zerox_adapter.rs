//! 0x Swap API v2 adapter (allowance-holder quotes)

use async_trait::async_trait;
use qp_types::{
	FeeParams, FetchOptions, NormalizedSwapRequest, QuoteAdapter, SecretString, UpstreamQuote,
	UpstreamQuoteError, UpstreamResult,
};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};
use url::Url;

use crate::client_cache::{ClientCache, ClientConfig};

pub const ZEROX_ADAPTER_ID: &str = "zerox-v2";

/// Connection settings for the 0x API
#[derive(Debug, Clone)]
pub struct ZeroExConfig {
	pub base_url: String,
	pub quote_path: String,
	pub api_key: SecretString,
	pub api_version: String,
	pub chain_id: u64,
	pub slippage_bps: u32,
	/// Concurrent in-flight requests and idle pooled connections
	pub max_connections: usize,
	pub keep_alive_timeout_ms: u64,
	pub connect_timeout_ms: u64,
}

impl ZeroExConfig {
	pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
		Self {
			base_url: base_url.into(),
			quote_path: "/swap/allowance-holder/quote".to_string(),
			api_key,
			api_version: "v2".to_string(),
			chain_id: qp_types::BASE_CHAIN_ID,
			slippage_bps: 200,
			max_connections: 10,
			keep_alive_timeout_ms: 90_000,
			connect_timeout_ms: 1_000,
		}
	}
}

/// Upstream client for 0x quotes
///
/// One GET per call, never retried. The whole exchange, including waiting for
/// an in-flight slot, is bounded by the caller's timeout.
#[derive(Debug)]
pub struct ZeroExAdapter {
	quote_url: Url,
	chain_id: u64,
	slippage_bps: u32,
	client_config: ClientConfig,
	client_cache: ClientCache,
	in_flight: Arc<Semaphore>,
}

impl ZeroExAdapter {
	pub fn new(config: ZeroExConfig) -> UpstreamResult<Self> {
		Self::with_cache(config, ClientCache::new())
	}

	/// Adapter resolving its pooled client from a shared cache on every call
	pub fn with_cache(config: ZeroExConfig, client_cache: ClientCache) -> UpstreamResult<Self> {
		if config.api_key.is_empty() {
			return Err(UpstreamQuoteError::ConfigError {
				reason: "0x API key is empty".to_string(),
			});
		}

		let quote_url = Url::parse(&config.base_url)
			.and_then(|base| base.join(&config.quote_path))
			.map_err(|e| UpstreamQuoteError::ConfigError {
				reason: format!(
					"invalid upstream URL '{}{}': {}",
					config.base_url, config.quote_path, e
				),
			})?;

		let max_connections = config.max_connections.max(1);
		let client_config = ClientConfig {
			max_idle_per_host: max_connections,
			keep_alive_timeout_ms: config.keep_alive_timeout_ms,
			connect_timeout_ms: config.connect_timeout_ms,
			..ClientConfig::new(config.base_url.clone())
		}
		.with_header("0x-api-key", config.api_key.expose_secret())
		.with_header("0x-version", config.api_version.clone());

		// Fail at startup on headers reqwest cannot encode
		client_cache.get_client(&client_config)?;

		Ok(Self {
			quote_url,
			chain_id: config.chain_id,
			slippage_bps: config.slippage_bps,
			client_config,
			client_cache,
			in_flight: Arc::new(Semaphore::new(max_connections)),
		})
	}

	pub fn quote_url(&self) -> &Url {
		&self.quote_url
	}

	fn client(&self) -> UpstreamResult<Arc<Client>> {
		self.client_cache.get_client(&self.client_config)
	}

	fn query_params(
		&self,
		request: &NormalizedSwapRequest,
		fee: &FeeParams,
	) -> Vec<(&'static str, String)> {
		vec![
			("chainId", self.chain_id.to_string()),
			("sellToken", request.sell_token.clone()),
			("buyToken", request.buy_token.clone()),
			("sellAmount", request.sell_amount.to_string()),
			("taker", request.taker.clone()),
			("swapFeeRecipient", fee.swap_fee_recipient.clone()),
			("swapFeeBps", fee.swap_fee_bps.to_string()),
			("swapFeeToken", fee.swap_fee_token.clone()),
			("slippageBps", self.slippage_bps.to_string()),
		]
	}

	async fn exchange(
		&self,
		request: &NormalizedSwapRequest,
		fee: &FeeParams,
		timeout_ms: u64,
	) -> UpstreamResult<UpstreamQuote> {
		let _permit =
			self.in_flight
				.acquire()
				.await
				.map_err(|_| UpstreamQuoteError::ConfigError {
					reason: "upstream request pool is closed".to_string(),
				})?;

		let response = self
			.client()?
			.get(self.quote_url.clone())
			.query(&self.query_params(request, fee))
			.send()
			.await
			.map_err(|e| map_transport_error(e, timeout_ms))?;

		let status = response.status();
		let body = response
			.text()
			.await
			.map_err(|e| map_transport_error(e, timeout_ms))?;

		if !status.is_success() {
			warn!(
				status = status.as_u16(),
				"0x quote endpoint returned an error: {}", body
			);
			return Err(UpstreamQuoteError::http_failure(status.as_u16(), body));
		}

		debug!("0x quote endpoint responded with {} bytes", body.len());

		serde_json::from_str::<UpstreamQuote>(&body).map_err(|e| {
			warn!("Failed to parse 0x quote response: {}", e);
			UpstreamQuoteError::InvalidResponse {
				reason: format!("Failed to parse 0x quote response: {}", e),
				body,
			}
		})
	}
}

fn map_transport_error(error: reqwest::Error, timeout_ms: u64) -> UpstreamQuoteError {
	if error.is_timeout() {
		UpstreamQuoteError::Timeout { timeout_ms }
	} else {
		UpstreamQuoteError::HttpError(error)
	}
}

#[async_trait]
impl QuoteAdapter for ZeroExAdapter {
	fn id(&self) -> &str {
		ZEROX_ADAPTER_ID
	}

	async fn fetch_quote(
		&self,
		request: &NormalizedSwapRequest,
		fee: &FeeParams,
		options: &FetchOptions,
	) -> UpstreamResult<UpstreamQuote> {
		let timeout_ms = options.timeout_ms();
		debug!(
			sell_token = %request.sell_token,
			buy_token = %request.buy_token,
			sell_amount = %request.sell_amount,
			swap_fee_bps = fee.swap_fee_bps,
			timeout_ms,
			"Requesting 0x quote"
		);

		// Dropping the exchange on timeout releases its pool slot and connection.
		match tokio::time::timeout(options.timeout, self.exchange(request, fee, timeout_ms)).await
		{
			Ok(result) => result,
			Err(_) => {
				warn!("0x quote request timed out after {}ms", timeout_ms);
				Err(UpstreamQuoteError::Timeout { timeout_ms })
			},
		}
	}
}
