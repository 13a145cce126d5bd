//! Swap Quote Proxy
//!
//! Sits between a wallet and an upstream swap aggregator: normalizes token
//! identifiers, injects the platform fee, caches recent quotes and hands back
//! unsigned transactions for the client to sign.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

pub use qp_types::{
	chrono, serde_json, ExecutionPayload, FeePolicy, FreshExecutionPayload, NativeAssetMode,
	Quote, QuoteAdapter, SwapRequest, UpstreamQuote, UpstreamQuoteError, U256,
};

pub use qp_adapters::{ClientCache, ZeroExAdapter, ZeroExConfig};
pub use qp_api::{create_router, AppState, ErrorResponse};
pub use qp_config::{
	load_config, log_service_info, log_service_shutdown, log_startup_complete,
	ConfigValidationError, ConfigurableValue, LogFormat, Settings,
};
pub use qp_service::{
	Clock, ExecutionPreparer, QuoteService, QuoteServiceOptions, QuoteServiceTrait, SystemClock,
	TokenNormalizer,
};
pub use qp_storage::{MemoryQuoteCache, QuoteCache};

pub mod models {
	pub use qp_types::*;
}

pub mod config {
	pub use qp_config::*;
}

pub mod adapters {
	pub use qp_adapters::*;
}

pub mod storage {
	pub use qp_storage::*;
}

pub mod service {
	pub use qp_service::*;
}

pub mod api {
	pub use qp_api::*;
}

pub mod mocks;

/// Failures that prevent the proxy from starting
#[derive(Debug, Error)]
pub enum ProxyStartupError {
	#[error("Failed to load configuration: {0}")]
	Load(#[from] qp_config::ConfigLoadError),

	#[error("Invalid configuration: {0}")]
	Config(#[from] ConfigValidationError),

	#[error("Failed to set up upstream client: {0}")]
	Upstream(#[from] UpstreamQuoteError),

	#[error("Failed to initialize logging: {0}")]
	Logging(String),

	#[error("Server error: {0}")]
	Io(#[from] std::io::Error),
}

/// Assembles settings, upstream adapter, cache and clock into a router
///
/// Anything not supplied is built from the settings.
#[derive(Default)]
pub struct ProxyBuilder {
	settings: Option<Settings>,
	adapter: Option<Arc<dyn QuoteAdapter>>,
	cache: Option<Arc<dyn QuoteCache>>,
	clock: Option<Arc<dyn Clock>>,
	client_cache: ClientCache,
}

impl ProxyBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Use a custom upstream adapter instead of the 0x client
	pub fn with_adapter(mut self, adapter: Arc<dyn QuoteAdapter>) -> Self {
		self.adapter = Some(adapter);
		self
	}

	pub fn with_cache(mut self, cache: Arc<dyn QuoteCache>) -> Self {
		self.cache = Some(cache);
		self
	}

	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = Some(clock);
		self
	}

	/// Share pooled upstream clients with other components
	pub fn with_client_cache(mut self, client_cache: ClientCache) -> Self {
		self.client_cache = client_cache;
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Build the router and state without binding a socket
	pub fn start(self) -> Result<(axum::Router, AppState), ProxyStartupError> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;
		let fee_policy = settings.fee_policy()?;

		let adapter = match self.adapter {
			Some(adapter) => adapter,
			None => {
				let adapter =
					ZeroExAdapter::with_cache(zerox_config(&settings)?, self.client_cache)?;
				info!("Upstream quotes from {}", adapter.quote_url());
				Arc::new(adapter) as Arc<dyn QuoteAdapter>
			},
		};

		let cache = self.cache.unwrap_or_else(|| {
			Arc::new(MemoryQuoteCache::new(
				Duration::from_secs(settings.cache.ttl_secs),
				settings.cache.max_entries,
			))
		});
		let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

		let options = QuoteServiceOptions {
			normalizer: TokenNormalizer::new(
				settings.tokens.native_asset_mode,
				settings.tokens.native_sentinel.clone(),
				settings.tokens.wrapped_native.clone(),
			),
			validity: Duration::from_secs(settings.quotes.validity_secs),
			quote_timeout: Duration::from_millis(settings.timeouts.quote_ms),
			execute_timeout: Duration::from_millis(settings.timeouts.execute_ms),
		};

		let quote_service = QuoteService::with_clock(adapter, cache, fee_policy, options, clock);
		let app_state = AppState::new(
			Arc::new(quote_service.clone()) as Arc<dyn QuoteServiceTrait>,
			quote_service.execution_preparer(),
		);

		let router = create_router().with_state(app_state.clone());
		Ok((router, app_state))
	}

	/// Load `.env` and config, initialize tracing, then serve until Ctrl-C
	pub async fn start_server(mut self) -> Result<(), ProxyStartupError> {
		dotenvy::dotenv().ok();

		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		init_tracing_from_settings(&settings)?;
		log_service_info(&settings);

		let bind_addr = settings.bind_address()?;
		let (app, _) = self.with_settings(settings).start()?;

		let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
		log_startup_complete(&bind_addr);
		info!("API endpoints available (also under /api):");
		info!("  GET  /health");
		info!("  POST /quote");
		info!("  POST /prepare-swap");
		info!("  POST /quote-and-execute");

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await?;

		log_service_shutdown();
		Ok(())
	}
}

fn zerox_config(settings: &Settings) -> Result<ZeroExConfig, ConfigValidationError> {
	let upstream = &settings.upstream;
	Ok(ZeroExConfig {
		base_url: upstream.base_url.clone(),
		quote_path: upstream.quote_path.clone(),
		api_key: settings.api_key()?,
		api_version: upstream.api_version.clone(),
		chain_id: upstream.chain_id,
		slippage_bps: upstream.slippage_bps,
		max_connections: upstream.max_connections,
		keep_alive_timeout_ms: upstream.keep_alive_timeout_ms,
		connect_timeout_ms: upstream.connect_timeout_ms,
	})
}

/// Initialize tracing from `logging` settings; `RUST_LOG` wins over the configured level
fn init_tracing_from_settings(settings: &Settings) -> Result<(), ProxyStartupError> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level));
	let structured = settings.logging.structured;

	let result = match settings.logging.format {
		LogFormat::Json => tracing_subscriber::fmt()
			.json()
			.with_env_filter(env_filter)
			.with_target(structured)
			.with_thread_ids(structured)
			.try_init(),
		LogFormat::Pretty => tracing_subscriber::fmt()
			.pretty()
			.with_env_filter(env_filter)
			.with_target(structured)
			.with_thread_ids(structured)
			.try_init(),
		LogFormat::Compact => tracing_subscriber::fmt()
			.compact()
			.with_env_filter(env_filter)
			.with_target(structured)
			.with_thread_ids(structured)
			.try_init(),
	};
	result.map_err(|e| ProxyStartupError::Logging(e.to_string()))?;

	info!(
		"Logging configuration applied: level={}, format={:?}, structured={}",
		settings.logging.level, settings.logging.format, structured
	);
	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		warn!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
	info!("Shutdown signal received");
}
