//! Storage contract for fixed-window rate-limit counters.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

/// Outcome of a rate-limit check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateDecision {
	Allow,
	/// The window is exhausted; carries the ceiling the check was made against
	Deny { ceiling: u32 },
}

impl RateDecision {
	pub fn is_allowed(self) -> bool {
		matches!(self, RateDecision::Allow)
	}
}

/// One fixed window: wall-clock time cut into `len_ms` sized buckets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
	pub start_ms: u64,
	pub len_ms: u64,
}

impl Window {
	/// The window of length `len_ms` that contains `now_ms`
	pub fn containing(now_ms: u64, len_ms: u64) -> Window {
		let len_ms = len_ms.max(1);
		Window { start_ms: now_ms - now_ms % len_ms, len_ms }
	}

	pub fn end_ms(&self) -> u64 {
		self.start_ms.saturating_add(self.len_ms)
	}
}

/// Keyed counter store.
///
/// `check_and_increment` must behave as one atomic step per key: reset the
/// counter if the stored window differs from `window`, then increment it if it
/// is below `ceiling`. Unrelated keys must not be serialized behind one lock.
#[async_trait]
pub trait RateLimitStore: Debug + Send + Sync {
	async fn check_and_increment(&self, key: &str, window: Window, ceiling: u32)
	-> SgResult<RateDecision>;

	/// Drops windows that ended at or before `now_ms`. Returns how many were removed.
	async fn purge_expired(&self, now_ms: u64) -> SgResult<usize>;
}


// vim: ts=4
