//! Time sources for the rate limiter

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use statgate_types::types::now_millis;

pub trait Clock: Debug + Send + Sync {
	/// Milliseconds since the Unix epoch
	fn now_ms(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now_ms(&self) -> u64 {
		now_millis()
	}
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
	now_ms: AtomicU64,
}

impl ManualClock {
	pub fn new(now_ms: u64) -> Self {
		Self { now_ms: AtomicU64::new(now_ms) }
	}

	pub fn advance(&self, by: Duration) {
		let by = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
		self.now_ms.fetch_add(by, Ordering::SeqCst);
	}

	pub fn set(&self, now_ms: u64) {
		self.now_ms.store(now_ms, Ordering::SeqCst);
	}
}

impl Clock for ManualClock {
	fn now_ms(&self) -> u64 {
		self.now_ms.load(Ordering::SeqCst)
	}
}

// vim: ts=4
