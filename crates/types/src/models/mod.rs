//! Shared domain models used across adapters, services, and the API

pub mod secret_string;
pub mod token;
pub mod u256;

pub use secret_string::SecretString;
pub use token::{NativeAssetMode, BASE_CHAIN_ID, BASE_WRAPPED_NATIVE, NATIVE_ASSET_SENTINEL};
pub use u256::U256;
