//! Token normalization
//!
//! Resolves the native-asset sentinel to whatever the upstream aggregator is
//! configured to receive. Every other identifier passes through unchanged.

use qp_types::models::token::same_address;
use qp_types::{
	NativeAssetMode, NormalizedSwapRequest, SwapRequest, SwapValidationError, BASE_WRAPPED_NATIVE,
	NATIVE_ASSET_SENTINEL,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenNormalizer {
	mode: NativeAssetMode,
	native_sentinel: String,
	wrapped_native: String,
}

impl TokenNormalizer {
	pub fn new(
		mode: NativeAssetMode,
		native_sentinel: impl Into<String>,
		wrapped_native: impl Into<String>,
	) -> Self {
		Self {
			mode,
			native_sentinel: native_sentinel.into(),
			wrapped_native: wrapped_native.into(),
		}
	}

	/// Normalizer for Base with the given mode
	pub fn for_base(mode: NativeAssetMode) -> Self {
		Self::new(mode, NATIVE_ASSET_SENTINEL, BASE_WRAPPED_NATIVE)
	}

	pub fn mode(&self) -> NativeAssetMode {
		self.mode
	}

	pub fn is_native(&self, token: &str) -> bool {
		same_address(token, &self.native_sentinel)
	}

	pub fn normalize_token(&self, token: &str) -> String {
		match self.mode {
			NativeAssetMode::Wrap if self.is_native(token) => self.wrapped_native.clone(),
			_ => token.to_string(),
		}
	}

	/// Validate a client request and resolve both token fields independently
	pub fn normalize(
		&self,
		request: &SwapRequest,
	) -> Result<NormalizedSwapRequest, SwapValidationError> {
		request.validate()?;

		NormalizedSwapRequest::try_new(
			self.normalize_token(&request.sell_token),
			self.normalize_token(&request.buy_token),
			request.sell_amount.clone(),
			request.taker.clone(),
		)
	}
}

impl Default for TokenNormalizer {
	fn default() -> Self {
		Self::for_base(NativeAssetMode::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use qp_types::U256;

	const USDC: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
	const TAKER: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

	fn swap(sell: &str, buy: &str) -> SwapRequest {
		SwapRequest::new(sell, buy, U256::from(1_000_000u64), TAKER)
	}

	#[test]
	fn test_passthrough_keeps_sentinel() {
		let normalizer = TokenNormalizer::for_base(NativeAssetMode::Passthrough);
		assert_eq!(
			normalizer.normalize_token(NATIVE_ASSET_SENTINEL),
			NATIVE_ASSET_SENTINEL
		);
		assert_eq!(normalizer.normalize_token(USDC), USDC);
	}

	#[test]
	fn test_wrap_rewrites_sentinel_case_insensitively() {
		let normalizer = TokenNormalizer::for_base(NativeAssetMode::Wrap);
		assert_eq!(
			normalizer.normalize_token(&NATIVE_ASSET_SENTINEL.to_lowercase()),
			BASE_WRAPPED_NATIVE
		);
		assert_eq!(
			normalizer.normalize_token(&NATIVE_ASSET_SENTINEL.to_uppercase().replace("0X", "0x")),
			BASE_WRAPPED_NATIVE
		);
		assert_eq!(normalizer.normalize_token(USDC), USDC);
	}

	#[test]
	fn test_normalization_is_idempotent() {
		for mode in [NativeAssetMode::Passthrough, NativeAssetMode::Wrap] {
			let normalizer = TokenNormalizer::for_base(mode);
			for token in [NATIVE_ASSET_SENTINEL, USDC, BASE_WRAPPED_NATIVE, "not-an-address"] {
				let once = normalizer.normalize_token(token);
				assert_eq!(normalizer.normalize_token(&once), once, "mode {mode}");
			}
		}
	}

	#[test]
	fn test_both_sides_are_normalized_independently() {
		let normalizer = TokenNormalizer::for_base(NativeAssetMode::Wrap);
		let sell_native = normalizer.normalize(&swap(NATIVE_ASSET_SENTINEL, USDC)).unwrap();
		assert_eq!(sell_native.sell_token, BASE_WRAPPED_NATIVE);
		assert_eq!(sell_native.buy_token, USDC);

		let buy_native = normalizer.normalize(&swap(USDC, NATIVE_ASSET_SENTINEL)).unwrap();
		assert_eq!(buy_native.sell_token, USDC);
		assert_eq!(buy_native.buy_token, BASE_WRAPPED_NATIVE);
	}

	#[test]
	fn test_wrapping_can_produce_same_token_pair() {
		let normalizer = TokenNormalizer::for_base(NativeAssetMode::Wrap);
		let result = normalizer.normalize(&swap(NATIVE_ASSET_SENTINEL, BASE_WRAPPED_NATIVE));
		assert!(matches!(result, Err(SwapValidationError::SameToken { .. })));

		let passthrough = TokenNormalizer::for_base(NativeAssetMode::Passthrough);
		assert!(passthrough
			.normalize(&swap(NATIVE_ASSET_SENTINEL, BASE_WRAPPED_NATIVE))
			.is_ok());
	}

	#[test]
	fn test_invalid_request_is_rejected_before_normalizing() {
		let normalizer = TokenNormalizer::default();
		let mut request = swap(NATIVE_ASSET_SENTINEL, USDC);
		request.sell_amount = U256::new("0");
		assert!(matches!(
			normalizer.normalize(&request),
			Err(SwapValidationError::InvalidAmount { .. })
		));
	}
}
