//! HTTP-level tests for the Stats API middleware

use axum::{
	Json, Router,
	body::Body,
	http::{Request, StatusCode, header},
	middleware::from_fn_with_state,
	routing::get,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tower::ServiceExt;

use statgate_adapter_memory::MemoryAdapter;
use statgate_core::middleware::require_stats_api;
use statgate_core::rate_limit::{
	ManualClock, MemoryRateLimitStore, RateDecision, RateLimitStore, RateLimiter, Window,
};
use statgate_core::{App, AppState, AuthorizedSite};
use statgate_types::auth_adapter::{ApiKey, Feature};
use statgate_types::meta_adapter::Site;
use statgate_types::error::{Error, SgResult};
use statgate_types::types::{KeyId, SiteId, UserId};

const TOKEN: &str = "k_live_abc";

fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

/// Rate-limit store whose backend is down
#[derive(Debug)]
struct UnavailableStore;

#[async_trait::async_trait]
impl RateLimitStore for UnavailableStore {
	async fn check_and_increment(&self, _key: &str, _window: Window, _ceiling: u32) -> SgResult<RateDecision> {
		Err(Error::ServiceUnavailable("rate limit store".into()))
	}

	async fn purge_expired(&self, _now_ms: u64) -> SgResult<usize> {
		Err(Error::ServiceUnavailable("rate limit store".into()))
	}
}

fn create_test_app_with_store(adapter: Arc<MemoryAdapter>, store: Arc<dyn RateLimitStore>) -> App {
	Arc::new(AppState {
		auth_adapter: adapter.clone(),
		meta_adapter: adapter,
		rate_limiter: RateLimiter::new(store, Arc::new(ManualClock::new(0))),
	})
}

fn create_test_app(adapter: Arc<MemoryAdapter>) -> App {
	create_test_app_with_store(adapter, Arc::new(MemoryRateLimitStore::new()))
}

fn seeded_adapter(limit: u32) -> MemoryAdapter {
	MemoryAdapter::new()
		.with_user(UserId(1), &[Feature::StatsApi])
		.with_site(Site {
			site_id: SiteId(5),
			domain: "new.example".into(),
			domain_changed_from: Some("old.example".into()),
			locked: false,
		})
		.with_member(UserId(1), SiteId(5))
		.with_api_key(
			TOKEN,
			ApiKey {
				key_id: KeyId(1),
				user_id: UserId(1),
				name: "dashboard".into(),
				hourly_request_limit: limit,
			},
		)
}

async fn site_domain(AuthorizedSite(site): AuthorizedSite) -> Json<serde_json::Value> {
	Json(serde_json::json!({ "domain": site.domain }))
}

fn router(app: App) -> Router {
	Router::new()
		.route("/api/v1/stats/aggregate", get(site_domain))
		.layer(from_fn_with_state(app.clone(), require_stats_api))
		.with_state(app)
}

async fn call(router: Router, uri: &str, auth: Option<&str>) -> (StatusCode, serde_json::Value) {
	let mut builder = Request::builder().uri(uri);
	if let Some(auth) = auth {
		builder = builder.header(header::AUTHORIZATION, auth);
	}
	let response = router
		.oneshot(builder.body(Body::empty()).expect("request"))
		.await
		.expect("router is infallible");
	let status = response.status();
	let bytes = response.into_body().collect().await.expect("body").to_bytes();
	let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
	(status, json)
}

#[tokio::test]
async fn test_authorized_request_reaches_handler() {
	let app = create_test_app(Arc::new(seeded_adapter(10)));
	let (status, body) = call(
		router(app),
		"/api/v1/stats/aggregate?site_id=new.example",
		Some(&format!("Bearer {}", TOKEN)),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["domain"], "new.example");
}

#[tokio::test]
async fn test_previous_domain_reaches_renamed_site() {
	let app = create_test_app(Arc::new(seeded_adapter(10)));
	let (status, body) = call(
		router(app),
		"/api/v1/stats/aggregate?site_id=old.example",
		Some(&format!("Bearer {}", TOKEN)),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["domain"], "new.example");
}

#[tokio::test]
async fn test_missing_api_key() {
	setup_test_logging();
	let app = create_test_app(Arc::new(seeded_adapter(10)));
	let (status, body) =
		call(router(app.clone()), "/api/v1/stats/aggregate?site_id=new.example", None).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert!(body["error"].as_str().unwrap_or_default().starts_with("Missing API key"));

	let (status, _) = call(
		router(app),
		"/api/v1/stats/aggregate?site_id=new.example",
		Some(&format!("Token {}", TOKEN)),
	)
	.await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_site_id() {
	let app = create_test_app(Arc::new(seeded_adapter(10)));
	let (status, body) =
		call(router(app), "/api/v1/stats/aggregate", Some(&format!("Bearer {}", TOKEN))).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert!(body["error"].as_str().unwrap_or_default().starts_with("Missing site ID"));
}

#[tokio::test]
async fn test_unknown_site_and_foreign_site_look_the_same() {
	let adapter = seeded_adapter(10).with_site(Site {
		site_id: SiteId(6),
		domain: "foreign.example".into(),
		domain_changed_from: None,
		locked: false,
	});
	let app = create_test_app(Arc::new(adapter));
	let auth = format!("Bearer {}", TOKEN);

	let unknown =
		call(router(app.clone()), "/api/v1/stats/aggregate?site_id=ghost.example", Some(&auth)).await;
	let foreign =
		call(router(app), "/api/v1/stats/aggregate?site_id=foreign.example", Some(&auth)).await;

	assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
	assert_eq!(unknown, foreign);
}

#[tokio::test]
async fn test_rate_limit_response() {
	let app = create_test_app(Arc::new(seeded_adapter(1)));
	let auth = format!("Bearer {}", TOKEN);
	let uri = "/api/v1/stats/aggregate?site_id=new.example";

	let (status, _) = call(router(app.clone()), uri, Some(&auth)).await;
	assert_eq!(status, StatusCode::OK);

	let (status, body) = call(router(app), uri, Some(&auth)).await;
	assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
	assert!(body["error"].as_str().unwrap_or_default().contains("limited to 1 requests per hour"));
}

#[tokio::test]
async fn test_storage_failure_is_service_unavailable() {
	setup_test_logging();
	let adapter = Arc::new(seeded_adapter(10));
	adapter.fail_lookups(true);
	let app = create_test_app(adapter);

	let (status, body) = call(
		router(app),
		"/api/v1/stats/aggregate?site_id=new.example",
		Some(&format!("Bearer {}", TOKEN)),
	)
	.await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert!(!body["error"].as_str().unwrap_or_default().contains("Invalid API key"));
}

#[tokio::test]
async fn test_repeated_site_id_uses_first_value() {
	let app = create_test_app(Arc::new(seeded_adapter(10)));
	let auth = format!("Bearer {}", TOKEN);

	let (status, body) = call(
		router(app.clone()),
		"/api/v1/stats/aggregate?site_id=new.example&site_id=new.example",
		Some(&auth),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["domain"], "new.example");

	let (status, body) = call(
		router(app),
		"/api/v1/stats/aggregate?period=30d&site_id=old.example&site_id=ghost.example",
		Some(&auth),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["domain"], "new.example");
}

#[tokio::test]
async fn test_rate_store_failure_never_reaches_handler() {
	setup_test_logging();
	let app = create_test_app_with_store(Arc::new(seeded_adapter(10)), Arc::new(UnavailableStore));
	let reached = Arc::new(AtomicBool::new(false));

	let handler_reached = Arc::clone(&reached);
	let router = Router::new()
		.route(
			"/api/v1/stats/aggregate",
			get(move || async move {
				handler_reached.store(true, Ordering::SeqCst);
				"stats"
			}),
		)
		.layer(from_fn_with_state(app.clone(), require_stats_api))
		.with_state(app);

	let (status, body) = call(
		router,
		"/api/v1/stats/aggregate?site_id=new.example",
		Some(&format!("Bearer {}", TOKEN)),
	)
	.await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert!(body["error"].as_str().unwrap_or_default().contains("temporarily unavailable"));
	assert!(!reached.load(Ordering::SeqCst));
}

