//! Quote Proxy Types
//!
//! Shared models and traits for the swap quote proxy.
//! This crate contains all domain models organized by business entity.

pub mod adapters;
pub mod execution;
pub mod fees;
pub mod models;
pub mod quotes;
pub mod swaps;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use adapters::{FetchOptions, QuoteAdapter, UpstreamQuoteError, UpstreamResult};
pub use execution::{ExecutionPayload, FreshExecutionPayload};
pub use fees::{FeeParams, FeePolicy, FeePolicyError};
pub use models::{
	NativeAssetMode, SecretString, U256, BASE_CHAIN_ID, BASE_WRAPPED_NATIVE, NATIVE_ASSET_SENTINEL,
};
pub use quotes::{Quote, QuoteExpiredError, QuoteTransaction, UpstreamQuote};
pub use swaps::{NormalizedSwapRequest, QuoteKey, SwapRequest, SwapValidationError};
