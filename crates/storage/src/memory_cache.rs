//! In-memory quote cache with lazy TTL expiry and FIFO eviction

use crate::traits::QuoteCache;
use indexmap::IndexMap;
use qp_types::{Quote, QuoteKey};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone)]
struct CacheEntry {
	quote: Quote,
	inserted_at: i64,
}

/// Quote cache kept in insertion order
///
/// Reads never change an entry's position, so eviction removes the
/// oldest-inserted entry rather than the least recently read one.
#[derive(Debug)]
pub struct MemoryQuoteCache {
	entries: Mutex<IndexMap<QuoteKey, CacheEntry>>,
	ttl_ms: i64,
	max_entries: usize,
}

impl MemoryQuoteCache {
	pub fn new(ttl: Duration, max_entries: usize) -> Self {
		Self {
			entries: Mutex::new(IndexMap::with_capacity(max_entries.saturating_add(1))),
			ttl_ms: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
			max_entries: max_entries.max(1),
		}
	}

	pub fn ttl(&self) -> Duration {
		Duration::from_millis(self.ttl_ms as u64)
	}

	pub fn max_entries(&self) -> usize {
		self.max_entries
	}

	fn lock(&self) -> MutexGuard<'_, IndexMap<QuoteKey, CacheEntry>> {
		// The map is left consistent by every operation, so a poisoned lock is still usable.
		self.entries
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	fn is_expired(&self, entry: &CacheEntry, now_ms: i64) -> bool {
		now_ms.saturating_sub(entry.inserted_at) >= self.ttl_ms
	}
}

impl Default for MemoryQuoteCache {
	fn default() -> Self {
		Self::new(DEFAULT_CACHE_TTL, DEFAULT_MAX_ENTRIES)
	}
}

impl QuoteCache for MemoryQuoteCache {
	fn get_at(&self, key: &QuoteKey, now_ms: i64) -> Option<Quote> {
		let mut entries = self.lock();
		let entry = entries.get(key)?;

		if self.is_expired(entry, now_ms) {
			entries.shift_remove(key);
			debug!(key = %key, "Discarded expired cache entry");
			return None;
		}

		Some(entry.quote.clone())
	}

	fn put_at(&self, key: QuoteKey, quote: Quote, now_ms: i64) {
		let mut entries = self.lock();

		// An overwrite counts as a fresh insertion.
		entries.shift_remove(&key);
		entries.insert(
			key,
			CacheEntry {
				quote,
				inserted_at: now_ms,
			},
		);

		if entries.len() > self.max_entries {
			if let Some((evicted, _)) = entries.shift_remove_index(0) {
				debug!(key = %evicted, "Evicted oldest cache entry");
			}
		}
	}

	fn len(&self) -> usize {
		self.lock().len()
	}

	fn clear(&self) {
		self.lock().clear();
	}
}
