//! Built-in handlers

use axum::Json;

use statgate_core::AuthorizedSite;
use statgate_core::app::VERSION;
use statgate_types::meta_adapter::Site;

/// GET /api/health
pub async fn get_health() -> Json<serde_json::Value> {
	Json(serde_json::json!({ "status": "ok", "version": VERSION }))
}

/// GET /api/v1/stats/site
///
/// Echoes the site the key was authorized for. Lets integrations verify a
/// key and site id pair without running a query.
pub async fn get_site(AuthorizedSite(site): AuthorizedSite) -> Json<Site> {
	Json(site)
}

// vim: ts=4
