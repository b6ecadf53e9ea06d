//! Router setup

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::handler;
use statgate_core::App;
use statgate_core::middleware::require_stats_api;

pub const STATS_API_PREFIX: &str = "/api/v1/stats";

/// Builds the public router.
///
/// `stats_routes` hold the statistics endpoints, with paths relative to
/// [`STATS_API_PREFIX`]. They are merged with the built-in ones and served
/// behind the Stats API middleware.
pub fn init(app: App, stats_routes: Router<App>) -> Router {
	let stats = Router::new()
		.route("/site", get(handler::get_site))
		.merge(stats_routes)
		.route_layer(middleware::from_fn_with_state(app.clone(), require_stats_api));

	Router::new()
		.route("/api/health", get(handler::get_health))
		.nest(STATS_API_PREFIX, stats)
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
