//! App state type

use std::sync::Arc;

use statgate_types::auth_adapter::AuthAdapter;
use statgate_types::meta_adapter::MetaAdapter;

use crate::rate_limit::RateLimiter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub auth_adapter: Arc<dyn AuthAdapter>,
	pub meta_adapter: Arc<dyn MetaAdapter>,

	// Rate limiter
	pub rate_limiter: RateLimiter,
}

pub type App = Arc<AppState>;

// vim: ts=4
