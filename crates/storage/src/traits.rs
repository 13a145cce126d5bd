//! Quote cache seam

use qp_types::{Quote, QuoteKey};
use std::fmt::Debug;

/// Bounded, TTL-based store of recently issued quotes
///
/// Implementations must make each call atomic with respect to the others.
/// Concurrent misses are not coalesced; the last `put` for a key wins.
pub trait QuoteCache: Send + Sync + Debug {
	/// Look up `key` as of `now_ms` (epoch milliseconds)
	fn get_at(&self, key: &QuoteKey, now_ms: i64) -> Option<Quote>;

	/// Store `quote` under `key`, recording `now_ms` as its insertion time
	fn put_at(&self, key: QuoteKey, quote: Quote, now_ms: i64);

	fn len(&self) -> usize;

	fn clear(&self);

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
