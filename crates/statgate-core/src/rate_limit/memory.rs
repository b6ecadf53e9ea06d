//! In-memory rate-limit store
//!
//! Windows live in a sharded map of per-key mutexes. Inserting a new key
//! only locks its shard, so checks for different keys run in parallel and
//! only checks for the same key serialize on that key's mutex.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::prelude::*;
use statgate_types::rate_limit_store::{RateDecision, RateLimitStore, Window};

/// Count for one key inside one window
#[derive(Debug)]
struct RateWindow {
	window: Window,
	count: u32,
}

impl RateWindow {
	/// Resets when a later window starts, then takes a slot if one is left.
	/// A request from an earlier window (clock stepped back) counts against
	/// the stored one. Runs entirely under the key's mutex, so it either
	/// commits or does not.
	fn hit(&mut self, window: Window, ceiling: u32) -> RateDecision {
		if window.start_ms > self.window.start_ms {
			self.window = window;
			self.count = 0;
		}
		if self.count >= ceiling {
			return RateDecision::Deny { ceiling };
		}
		self.count += 1;
		RateDecision::Allow
	}
}

#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
	windows: DashMap<Box<str>, Arc<Mutex<RateWindow>>>,
}

impl MemoryRateLimitStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of keys currently tracked
	pub fn tracked_keys(&self) -> usize {
		self.windows.len()
	}

	fn entry(&self, key: &str, window: Window) -> Arc<Mutex<RateWindow>> {
		if let Some(entry) = self.windows.get(key) {
			return Arc::clone(entry.value());
		}

		// Another request may have inserted the key since the lookup
		let entry = self
			.windows
			.entry(key.into())
			.or_insert_with(|| Arc::new(Mutex::new(RateWindow { window, count: 0 })));
		Arc::clone(entry.value())
	}
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
	async fn check_and_increment(
		&self,
		key: &str,
		window: Window,
		ceiling: u32,
	) -> SgResult<RateDecision> {
		let entry = self.entry(key, window);
		let decision = entry.lock().hit(window, ceiling);
		Ok(decision)
	}

	async fn purge_expired(&self, now_ms: u64) -> SgResult<usize> {
		let mut purged = 0;
		// An entry still referenced by an in-flight check is kept, otherwise that
		// check would count into a detached window
		self.windows.retain(|_, entry| {
			let keep = Arc::strong_count(entry) > 1 || entry.lock().window.end_ms() > now_ms;
			if !keep {
				purged += 1;
			}
			keep
		});
		Ok(purged)
	}
}


// vim: ts=4
