//! Swap requests as received from wallets and as sent upstream

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{token::same_address, U256};

pub mod errors;

pub use errors::SwapValidationError;

/// Result type for swap validation
pub type SwapValidationResult<T> = Result<T, SwapValidationError>;

/// Swap parameters posted by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
	/// Token being sold (address or the native-asset sentinel)
	pub sell_token: String,
	/// Token being bought (address or the native-asset sentinel)
	pub buy_token: String,
	/// Amount in the sell token's smallest unit
	pub sell_amount: U256,
	/// Address that will sign and send the swap transaction
	pub taker: String,
}

impl SwapRequest {
	pub fn new(
		sell_token: impl Into<String>,
		buy_token: impl Into<String>,
		sell_amount: U256,
		taker: impl Into<String>,
	) -> Self {
		Self {
			sell_token: sell_token.into(),
			buy_token: buy_token.into(),
			sell_amount,
			taker: taker.into(),
		}
	}

	/// Field-level checks that do not depend on normalization
	pub fn validate(&self) -> SwapValidationResult<()> {
		for (field, value) in [
			("sellToken", &self.sell_token),
			("buyToken", &self.buy_token),
			("taker", &self.taker),
		] {
			if value.trim().is_empty() {
				return Err(SwapValidationError::MissingRequiredField {
					field: field.to_string(),
				});
			}
		}

		self.sell_amount
			.validate()
			.map_err(|reason| SwapValidationError::InvalidAmount {
				field: "sellAmount".to_string(),
				reason,
			})?;

		if self.sell_amount.is_zero() {
			return Err(SwapValidationError::InvalidAmount {
				field: "sellAmount".to_string(),
				reason: "must be greater than zero".to_string(),
			});
		}

		Ok(())
	}
}

/// Swap parameters after native-asset resolution; the cache key material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSwapRequest {
	pub sell_token: String,
	pub buy_token: String,
	pub sell_amount: U256,
	pub taker: String,
}

impl NormalizedSwapRequest {
	/// Build a normalized request, rejecting swaps of an asset into itself
	pub fn try_new(
		sell_token: String,
		buy_token: String,
		sell_amount: U256,
		taker: String,
	) -> SwapValidationResult<Self> {
		if same_address(&sell_token, &buy_token) {
			return Err(SwapValidationError::SameToken { token: sell_token });
		}

		Ok(Self {
			sell_token,
			buy_token,
			sell_amount,
			taker,
		})
	}

	pub fn cache_key(&self) -> QuoteKey {
		QuoteKey::from(self)
	}
}

/// Deterministic cache key: sell token, buy token, sell amount, taker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteKey(String);

impl QuoteKey {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&NormalizedSwapRequest> for QuoteKey {
	fn from(request: &NormalizedSwapRequest) -> Self {
		Self(format!(
			"{}-{}-{}-{}",
			request.sell_token, request.buy_token, request.sell_amount, request.taker
		))
	}
}

impl fmt::Display for QuoteKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
