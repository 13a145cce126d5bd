//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};

pub use config::ConfigError as ConfigLoadError;

/// Default config file stem, resolved relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config";

/// Load settings from the config file (optional) and `QP__`-prefixed environment
///
/// `CONFIG_PATH` overrides the file location. Nested keys use `__`, e.g.
/// `QP__TOKENS__NATIVE_ASSET_MODE=wrap`.
pub fn load_config() -> Result<Settings, ConfigError> {
	let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
	load_config_from(&path)
}

pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix("QP")
				.prefix_separator("__")
				.separator("__")
				.try_parsing(true),
		)
		.build()?;

	s.try_deserialize()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_file_yields_defaults() {
		let settings = load_config_from("does/not/exist/config").unwrap();
		assert_eq!(settings.fees.fee_bps, 8);
		assert_eq!(settings.upstream.base_url, "https://api.0x.org");
	}

	#[test]
	fn test_sample_config_parses() {
		let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/config");
		let settings = load_config_from(path).unwrap();
		assert_eq!(settings.upstream.chain_id, 8453);
		assert_eq!(settings.upstream.api_key.description(), "environment variable 'ZEROX_API_KEY'");
		assert!(settings.validate().is_ok());
	}
}
