//! Quote Proxy Adapters
//!
//! Upstream aggregator clients and their pooled HTTP clients.

pub mod client_cache;
pub mod zerox_adapter;

pub use client_cache::{ClientCache, ClientConfig};
pub use qp_types::{QuoteAdapter, UpstreamQuoteError, UpstreamResult};
pub use zerox_adapter::{ZeroExAdapter, ZeroExConfig, ZEROX_ADAPTER_ID};
