//! Pooled HTTP clients for upstream aggregators
//!
//! Clients are cached per configuration so every request to the same upstream
//! shares one keep-alive connection pool.

use dashmap::{mapref::entry::Entry, DashMap};
use qp_types::{UpstreamQuoteError, UpstreamResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Header names whose values are marked sensitive and never logged
const SENSITIVE_HEADERS: &[&str] = &["0x-api-key", "authorization"];

/// Everything that shapes a pooled client; also the cache key
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
	pub base_url: String,
	/// Maximum number of idle connections kept per host
	pub max_idle_per_host: usize,
	pub keep_alive_timeout_ms: u64,
	pub connect_timeout_ms: u64,
	/// Default headers sent with every request
	pub headers: Vec<(String, String)>,
}

impl ClientConfig {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			max_idle_per_host: 10,
			keep_alive_timeout_ms: 90_000,
			connect_timeout_ms: 1_000,
			headers: vec![(
				"User-Agent".to_string(),
				concat!("quote-proxy/", env!("CARGO_PKG_VERSION")).to_string(),
			)],
		}
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}
}

// Header values may carry the API key.
impl fmt::Debug for ClientConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let header_names: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
		f.debug_struct("ClientConfig")
			.field("base_url", &self.base_url)
			.field("max_idle_per_host", &self.max_idle_per_host)
			.field("keep_alive_timeout_ms", &self.keep_alive_timeout_ms)
			.field("connect_timeout_ms", &self.connect_timeout_ms)
			.field("headers", &header_names)
			.finish()
	}
}

#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn new(client: Client) -> Self {
		Self {
			client: Arc::new(client),
			created_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe cache of pooled HTTP clients with TTL
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientConfig, CachedClient>>,
	ttl: Duration,
}

impl ClientCache {
	/// Cache with a 30-minute client TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or create the pooled client for `config`
	pub fn get_client(&self, config: &ClientConfig) -> UpstreamResult<Arc<Client>> {
		self.clients.remove_if(config, |_, cached| {
			let expired = cached.is_expired(self.ttl);
			if expired {
				warn!(
					"Client for {} expired (age: {:?}), rebuilding",
					config.base_url,
					cached.created_at.elapsed()
				);
			}
			expired
		});

		if let Some(cached) = self.clients.get(config) {
			debug!("Reusing pooled client for {}", config.base_url);
			return Ok(cached.client.clone());
		}

		let cached = CachedClient::new(build_client(config)?);

		match self.clients.entry(config.clone()) {
			Entry::Occupied(entry) => {
				// Lost the race to a concurrent caller
				Ok(entry.get().client.clone())
			},
			Entry::Vacant(entry) => {
				let client = cached.client.clone();
				entry.insert(cached);
				debug!("Cached new pooled client for {}", config.base_url);
				Ok(client)
			},
		}
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}

	pub fn clear(&self) {
		self.clients.clear();
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}

fn build_client(config: &ClientConfig) -> UpstreamResult<Client> {
	let mut header_map = HeaderMap::new();
	for (name, value) in &config.headers {
		let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
			UpstreamQuoteError::ConfigError {
				reason: format!("invalid header name '{}': {}", name, e),
			}
		})?;
		let mut header_value =
			HeaderValue::from_str(value).map_err(|_| UpstreamQuoteError::ConfigError {
				reason: format!("invalid value for header '{}'", name),
			})?;
		if SENSITIVE_HEADERS
			.iter()
			.any(|sensitive| header_name.as_str().eq_ignore_ascii_case(sensitive))
		{
			header_value.set_sensitive(true);
		}
		header_map.insert(header_name, header_value);
	}

	ClientBuilder::new()
		.pool_max_idle_per_host(config.max_idle_per_host)
		.pool_idle_timeout(Duration::from_millis(config.keep_alive_timeout_ms))
		.connect_timeout(Duration::from_millis(config.connect_timeout_ms))
		.tcp_keepalive(Duration::from_secs(60))
		.default_headers(header_map)
		.build()
		.map_err(UpstreamQuoteError::HttpError)
}
