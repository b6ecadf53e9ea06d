//! statgate: a request gate for a statistics API.
//!
//! Build an app with [`AppBuilder`], plug in the adapters and serve. Every
//! route under `/api/v1/stats` is guarded by the Stats API middleware.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod handler;
pub mod routes;

pub use app::{AppBuilder, AppBuilderOpts};
pub use statgate_core::{App, AppState, AuthorizedSite, rate_limit};
pub use statgate_types::{auth_adapter, error, meta_adapter, prelude, rate_limit_store, types};

// vim: ts=4
