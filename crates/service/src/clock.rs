//! Wall-clock seam so freshness and TTL checks can be tested deterministically

use chrono::Utc;

#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
	/// Current Unix time in milliseconds
	fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now_ms(&self) -> i64 {
		Utc::now().timestamp_millis()
	}
}
