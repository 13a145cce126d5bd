//! Proxy spawned on an ephemeral port for end-to-end tests

use axum::Router;
use quote_proxy::{Clock, ProxyBuilder, QuoteAdapter, Settings};
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::api_fixtures::ApiFixtures;

pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl TestServer {
	/// Proxy backed by the given fake aggregator
	pub async fn spawn_with_adapter(
		adapter: Arc<dyn QuoteAdapter>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_builder(ProxyBuilder::new().with_adapter(adapter)).await
	}

	pub async fn spawn_with_adapter_and_clock(
		adapter: Arc<dyn QuoteAdapter>,
		clock: Arc<dyn Clock>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_builder(ProxyBuilder::new().with_adapter(adapter).with_clock(clock)).await
	}

	/// Proxy using the real 0x client pointed at `upstream_base_url`
	pub async fn spawn_against_upstream(
		upstream_base_url: &str,
		configure: impl FnOnce(&mut Settings),
	) -> Result<Self, Box<dyn std::error::Error>> {
		let mut settings = ApiFixtures::settings();
		settings.upstream.base_url = upstream_base_url.to_string();
		configure(&mut settings);
		let (app, _) = ProxyBuilder::new().with_settings(settings).start()?;
		Self::spawn_server_with_app(app).await
	}

	async fn spawn_with_builder(
		builder: ProxyBuilder,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let builder = if builder.settings().is_none() {
			builder.with_settings(ApiFixtures::settings())
		} else {
			builder
		};
		let (app, _) = builder.start()?;
		Self::spawn_server_with_app(app).await
	}

	async fn spawn_server_with_app(app: Router) -> Result<Self, Box<dyn std::error::Error>> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Ok(Self { base_url, handle })
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	pub fn abort(self) {
		self.handle.abort();
	}
}
