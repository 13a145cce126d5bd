//! Core adapter trait for upstream aggregators

use async_trait::async_trait;
use std::fmt::Debug;

use super::{FetchOptions, UpstreamResult};
use crate::fees::FeeParams;
use crate::quotes::UpstreamQuote;
use crate::swaps::NormalizedSwapRequest;

/// Interface to a swap-liquidity aggregator
///
/// Implementations issue exactly one upstream request per call and never retry.
#[async_trait]
pub trait QuoteAdapter: Send + Sync + Debug {
	/// Adapter identifier used in logs
	fn id(&self) -> &str;

	/// Fetch a priced quote with an embedded unsigned transaction
	async fn fetch_quote(
		&self,
		request: &NormalizedSwapRequest,
		fee: &FeeParams,
		options: &FetchOptions,
	) -> UpstreamResult<UpstreamQuote>;
}
