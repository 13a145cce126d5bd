//! Quote Proxy Storage
//!
//! The quote cache trait and its in-memory implementation.

pub mod memory_cache;
pub mod traits;

pub use memory_cache::{MemoryQuoteCache, DEFAULT_CACHE_TTL, DEFAULT_MAX_ENTRIES};
pub use traits::QuoteCache;
