pub mod common;
pub mod health;
pub mod quotes;
pub mod swaps;

pub use health::health;
pub use quotes::{post_quote, post_quote_and_execute};
pub use swaps::post_prepare_swap;
