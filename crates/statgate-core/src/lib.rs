//! Request gate for the Stats API.
//!
//! Every request passes four gates in order: bearer extraction, API key
//! resolution, the per-key hourly rate limit and the site access policy.
//! The first gate that fails decides the denial reason.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod access;
pub mod app;
pub mod authorization;
pub mod bearer;
pub mod extract;
pub mod middleware;
pub mod pipeline;
pub mod prelude;
pub mod rate_limit;

// Re-export commonly used types
pub use app::{App, AppState};
pub use authorization::{Authorization, Denial};
pub use extract::AuthorizedSite;
pub use pipeline::authorize;

// vim: ts=4
