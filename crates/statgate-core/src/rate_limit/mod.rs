//! Per-key fixed-window rate limiting
//!
//! The limiter turns "now" into the current window and delegates the atomic
//! check-and-increment to a [`RateLimitStore`]. The in-memory store is the
//! default; durable stores live in the adapter crates.

mod clock;
mod limiter;
mod memory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::{API_REQUEST_WINDOW, RateLimiter, api_request_key};
pub use memory::MemoryRateLimitStore;
pub use statgate_types::rate_limit_store::{RateDecision, RateLimitStore, Window};

// vim: ts=4
