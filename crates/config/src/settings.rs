//! Configuration settings structures

use crate::{configurable_value::ConfigurableValue, ConfigurableValueError};
use qp_types::{
	FeePolicy, FeePolicyError, NativeAssetMode, SecretString, BASE_CHAIN_ID, BASE_WRAPPED_NATIVE,
	NATIVE_ASSET_SENTINEL,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest a cached quote may be served, in seconds
pub const MAX_CACHE_TTL_SECS: u64 = 3_600;

/// Longest an issued quote may stay preparable, in seconds
pub const MAX_QUOTE_VALIDITY_SECS: u64 = 3_600;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub upstream: UpstreamSettings,
	pub fees: FeeSettings,
	pub tokens: TokenSettings,
	pub cache: CacheSettings,
	pub quotes: QuoteSettings,
	pub timeouts: TimeoutSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	/// Listening port, `PORT` from the environment by default
	pub port: ConfigurableValue,
}

/// Upstream aggregator (0x Swap API v2) configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UpstreamSettings {
	pub base_url: String,
	pub quote_path: String,
	pub api_key: ConfigurableValue,
	pub api_version: String,
	pub chain_id: u64,
	pub slippage_bps: u32,
	/// Upper bound on concurrent upstream requests and idle pooled sockets
	pub max_connections: usize,
	pub keep_alive_timeout_ms: u64,
	pub connect_timeout_ms: u64,
}

/// Platform fee configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FeeSettings {
	pub fee_bps: u32,
	pub recipient: ConfigurableValue,
}

/// Native-asset normalization for this deployment
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TokenSettings {
	pub native_asset_mode: NativeAssetMode,
	pub native_sentinel: String,
	pub wrapped_native: String,
}

/// Quote cache bounds
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheSettings {
	pub ttl_secs: u64,
	pub max_entries: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct QuoteSettings {
	/// How long an issued quote may be prepared for execution
	pub validity_secs: u64,
}

/// Upstream timeouts per endpoint
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutSettings {
	/// `/quote` (1000-3000ms recommended)
	pub quote_ms: u64,
	/// `/quote-and-execute`, kept tighter than `quote_ms`
	pub execute_ms: u64,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: ConfigurableValue::from_env("PORT"),
		}
	}
}

impl Default for UpstreamSettings {
	fn default() -> Self {
		Self {
			base_url: "https://api.0x.org".to_string(),
			quote_path: "/swap/allowance-holder/quote".to_string(),
			api_key: ConfigurableValue::from_env("ZEROX_API_KEY"),
			api_version: "v2".to_string(),
			chain_id: BASE_CHAIN_ID,
			slippage_bps: 200,
			max_connections: 10,
			keep_alive_timeout_ms: 90_000,
			connect_timeout_ms: 1_000,
		}
	}
}

impl Default for FeeSettings {
	fn default() -> Self {
		Self {
			fee_bps: 8,
			recipient: ConfigurableValue::from_env("FEE_RECIPIENT"),
		}
	}
}

impl Default for TokenSettings {
	fn default() -> Self {
		Self {
			native_asset_mode: NativeAssetMode::Passthrough,
			native_sentinel: NATIVE_ASSET_SENTINEL.to_string(),
			wrapped_native: BASE_WRAPPED_NATIVE.to_string(),
		}
	}
}

impl Default for CacheSettings {
	fn default() -> Self {
		Self {
			ttl_secs: 10,
			max_entries: 100,
		}
	}
}

impl Default for QuoteSettings {
	fn default() -> Self {
		Self { validity_secs: 30 }
	}
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			quote_ms: 3_000,
			execute_ms: 2_000,
		}
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings::default(),
			upstream: UpstreamSettings::default(),
			fees: FeeSettings::default(),
			tokens: TokenSettings::default(),
			cache: CacheSettings::default(),
			quotes: QuoteSettings::default(),
			timeouts: TimeoutSettings::default(),
			logging: LoggingSettings::default(),
		}
	}
}

/// Configuration problems that stop the server from starting
#[derive(Error, Debug)]
pub enum ConfigValidationError {
	#[error("Invalid fee policy: {0}")]
	Fee(#[from] FeePolicyError),

	#[error("Missing required setting '{setting}': {source}")]
	MissingValue {
		setting: &'static str,
		#[source]
		source: ConfigurableValueError,
	},

	#[error("Invalid setting '{setting}': {reason}")]
	Invalid {
		setting: &'static str,
		reason: String,
	},
}

impl Settings {
	/// Resolve the listening address; the port is required
	pub fn bind_address(&self) -> Result<String, ConfigValidationError> {
		let port: u16 = self
			.server
			.port
			.resolve_parsed()
			.map_err(|source| ConfigValidationError::MissingValue {
				setting: "server.port",
				source,
			})?;
		Ok(format!("{}:{}", self.server.host, port))
	}

	pub fn api_key(&self) -> Result<SecretString, ConfigValidationError> {
		self.upstream
			.api_key
			.resolve_secret()
			.map_err(|source| ConfigValidationError::MissingValue {
				setting: "upstream.api_key",
				source,
			})
	}

	/// Build the fee policy, range-checking `fee_bps`
	pub fn fee_policy(&self) -> Result<FeePolicy, ConfigValidationError> {
		let recipient = self.fees.recipient.resolve().map_err(|source| {
			ConfigValidationError::MissingValue {
				setting: "fees.recipient",
				source,
			}
		})?;
		Ok(FeePolicy::new(self.fees.fee_bps, recipient)?)
	}

	/// Check the static bounds that do not need the environment
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.fees.fee_bps > qp_types::fees::MAX_FEE_BPS {
			return Err(FeePolicyError::OutOfRange(self.fees.fee_bps).into());
		}
		if self.cache.max_entries == 0 {
			return Err(invalid("cache.max_entries", "must be at least 1"));
		}
		if !(1..=MAX_CACHE_TTL_SECS).contains(&self.cache.ttl_secs) {
			return Err(invalid("cache.ttl_secs", "must be between 1 and 3600 seconds"));
		}
		if !(1..=MAX_QUOTE_VALIDITY_SECS).contains(&self.quotes.validity_secs) {
			return Err(invalid("quotes.validity_secs", "must be between 1 and 3600 seconds"));
		}
		if self.timeouts.quote_ms == 0 || self.timeouts.execute_ms == 0 {
			return Err(invalid("timeouts", "timeouts must be non-zero"));
		}
		if self.upstream.max_connections == 0 {
			return Err(invalid("upstream.max_connections", "must be at least 1"));
		}
		if self.upstream.slippage_bps > qp_types::fees::MAX_FEE_BPS {
			return Err(invalid("upstream.slippage_bps", "must be at most 10000"));
		}
		if self.tokens.native_sentinel.trim().is_empty()
			|| self.tokens.wrapped_native.trim().is_empty()
		{
			return Err(invalid("tokens", "native sentinel and wrapped native are required"));
		}
		Ok(())
	}
}

fn invalid(setting: &'static str, reason: &str) -> ConfigValidationError {
	ConfigValidationError::Invalid {
		setting,
		reason: reason.to_string(),
	}
}
