//! Token identifiers and the native-asset handling mode

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder address used by wallets and aggregators for the chain's native coin
pub const NATIVE_ASSET_SENTINEL: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// Canonical wrapped-native (WETH) contract on Base
pub const BASE_WRAPPED_NATIVE: &str = "0x4200000000000000000000000000000000000006";

/// Base mainnet chain id
pub const BASE_CHAIN_ID: u64 = 8453;

/// How the native-asset sentinel is presented to the upstream aggregator
///
/// One mode is picked per deployment and applied to every endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeAssetMode {
	/// Forward the sentinel unchanged. The allowance-holder endpoint quotes
	/// native sells directly and sets the transaction `value`.
	#[default]
	Passthrough,
	/// Rewrite the sentinel to the wrapped-native contract address.
	/// Native sells then quote as wrapped-token sells with `value = 0`.
	Wrap,
}

impl NativeAssetMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			NativeAssetMode::Passthrough => "passthrough",
			NativeAssetMode::Wrap => "wrap",
		}
	}
}

impl fmt::Display for NativeAssetMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NativeAssetMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"passthrough" => Ok(NativeAssetMode::Passthrough),
			"wrap" => Ok(NativeAssetMode::Wrap),
			other => Err(format!(
				"unknown native asset mode '{}' (expected 'passthrough' or 'wrap')",
				other
			)),
		}
	}
}

/// Case-insensitive address comparison
pub fn same_address(a: &str, b: &str) -> bool {
	a.eq_ignore_ascii_case(b)
}
