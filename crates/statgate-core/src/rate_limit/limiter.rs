//! Rate limiter front end

use std::sync::Arc;
use std::time::Duration;

use super::clock::Clock;
use crate::prelude::*;
use statgate_types::rate_limit_store::{RateDecision, RateLimitStore, Window};

/// Window used for API key request limits
pub const API_REQUEST_WINDOW: Duration = Duration::from_secs(3600);

/// Counter key for an API key's request budget
pub fn api_request_key(key_id: KeyId) -> String {
	format!("api_request:{}", key_id)
}

#[derive(Debug, Clone)]
pub struct RateLimiter {
	store: Arc<dyn RateLimitStore>,
	clock: Arc<dyn Clock>,
}

impl RateLimiter {
	pub fn new(store: Arc<dyn RateLimitStore>, clock: Arc<dyn Clock>) -> Self {
		Self { store, clock }
	}

	/// Counts one request for `key` against `ceiling` in the current window.
	///
	/// A key must always be checked with the same window length; the counter
	/// key is namespaced by it so mixing lengths cannot corrupt a window.
	/// Store failures are returned as errors and never become an `Allow`.
	pub async fn check(&self, key: &str, window: Duration, ceiling: u32) -> SgResult<RateDecision> {
		if ceiling == 0 {
			return Ok(RateDecision::Deny { ceiling });
		}

		let len_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
		let window = Window::containing(self.clock.now_ms(), len_ms);
		let store_key = format!("{}/{}", key, len_ms);

		let decision = self.store.check_and_increment(&store_key, window, ceiling).await?;
		if !decision.is_allowed() {
			debug!(key = %key, ceiling, "rate limit reached");
		}
		Ok(decision)
	}

	/// Drops counters of windows that have already ended
	pub async fn purge_expired(&self) -> SgResult<usize> {
		self.store.purge_expired(self.clock.now_ms()).await
	}
}


// vim: ts=4
