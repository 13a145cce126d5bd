//! Startup and shutdown banners for the quote proxy

use crate::Settings;
use std::env;
use tracing::info;

/// Log process details and the effective (non-secret) configuration
pub fn log_service_info(settings: &Settings) {
	info!("=== Quote Proxy Starting ===");
	info!("🚀 Service: quote-proxy v{}", env!("CARGO_PKG_VERSION"));
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}
	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!(
		"🔗 Upstream: {}{} (chain {}, api {})",
		settings.upstream.base_url,
		settings.upstream.quote_path,
		settings.upstream.chain_id,
		settings.upstream.api_version
	);
	info!(
		"💸 Fee: {} bps, recipient {}",
		settings.fees.fee_bps, settings.fees.recipient
	);
	info!(
		"🪙 Native asset mode: {}",
		settings.tokens.native_asset_mode
	);
	info!(
		"🗄️ Cache: ttl {}s, max {} entries; quote validity {}s",
		settings.cache.ttl_secs, settings.cache.max_entries, settings.quotes.validity_secs
	);
	info!(
		"⏱️ Timeouts: quote {}ms, execute {}ms",
		settings.timeouts.quote_ms, settings.timeouts.execute_ms
	);
	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

pub fn log_service_shutdown() {
	info!("🛑 Quote Proxy Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

pub fn log_startup_complete(bind_address: &str) {
	info!("✅ Quote Proxy Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
}
