//! App builder - constructs and runs the statgate application

use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::routes;
use statgate_core::prelude::*;
use statgate_core::rate_limit::{Clock, MemoryRateLimitStore, RateLimiter, SystemClock};
use statgate_core::app::{AppState, VERSION};
use statgate_types::auth_adapter::AuthAdapter;
use statgate_types::meta_adapter::MetaAdapter;
use statgate_types::rate_limit_store::RateLimitStore;

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// How often counters of finished rate-limit windows are dropped
	pub purge_interval: Duration,
}

struct Adapters {
	auth_adapter: Option<Arc<dyn AuthAdapter>>,
	meta_adapter: Option<Arc<dyn MetaAdapter>>,
	rate_limit_store: Option<Arc<dyn RateLimitStore>>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
	clock: Arc<dyn Clock>,
	stats_routes: Router<App>,
}

impl AppBuilder {
	pub fn new() -> Self {
		// Embedders and tests may have installed a subscriber already
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				purge_interval: Duration::from_secs(300),
			},
			adapters: Adapters { auth_adapter: None, meta_adapter: None, rate_limit_store: None },
			clock: Arc::new(SystemClock),
			stats_routes: Router::new(),
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn purge_interval(&mut self, purge_interval: Duration) -> &mut Self {
		self.opts.purge_interval = purge_interval;
		self
	}
	pub fn clock(&mut self, clock: Arc<dyn Clock>) -> &mut Self {
		self.clock = clock;
		self
	}

	// Adapters
	pub fn auth_adapter(&mut self, auth_adapter: Arc<dyn AuthAdapter>) -> &mut Self {
		self.adapters.auth_adapter = Some(auth_adapter);
		self
	}
	pub fn meta_adapter(&mut self, meta_adapter: Arc<dyn MetaAdapter>) -> &mut Self {
		self.adapters.meta_adapter = Some(meta_adapter);
		self
	}
	/// Counter store for rate limits. Defaults to an in-memory store.
	pub fn rate_limit_store(&mut self, store: Arc<dyn RateLimitStore>) -> &mut Self {
		self.adapters.rate_limit_store = Some(store);
		self
	}

	/// Statistics endpoints to serve behind the gate, relative to `/api/v1/stats`
	pub fn stats_routes(&mut self, routes: Router<App>) -> &mut Self {
		self.stats_routes = std::mem::take(&mut self.stats_routes).merge(routes);
		self
	}

	pub fn build(self) -> SgResult<(App, Router, AppBuilderOpts)> {
		let Some(auth_adapter) = self.adapters.auth_adapter else {
			error!("FATAL: No auth adapter configured");
			return Err(Error::ConfigError("No auth adapter configured".into()));
		};
		let Some(meta_adapter) = self.adapters.meta_adapter else {
			error!("FATAL: No meta adapter configured");
			return Err(Error::ConfigError("No meta adapter configured".into()));
		};
		let rate_limit_store = self
			.adapters
			.rate_limit_store
			.unwrap_or_else(|| Arc::new(MemoryRateLimitStore::new()));

		let app: App = Arc::new(AppState {
			auth_adapter,
			meta_adapter,
			rate_limiter: RateLimiter::new(rate_limit_store, self.clock),
		});
		let router = routes::init(app.clone(), self.stats_routes);

		Ok((app, router, self.opts))
	}

	pub async fn run(self) -> SgResult<()> {
		info!("statgate V{}", VERSION);

		let (app, router, opts) = self.build()?;
		spawn_rate_window_purge(app, opts.purge_interval);

		let listener = tokio::net::TcpListener::bind(opts.listen.as_ref()).await.map_err(|err| {
			error!("FATAL: Cannot listen on {}: {}", opts.listen, err);
			Error::Io(err)
		})?;
		info!("Listening on {}", opts.listen);

		axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

		info!("Shut down");
		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn spawn_rate_window_purge(app: App, every: Duration) {
	tokio::spawn(async move {
		let mut interval = tokio::time::interval(every.max(Duration::from_secs(1)));
		interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
		loop {
			interval.tick().await;
			match app.rate_limiter.purge_expired().await {
				Ok(0) => {}
				Ok(purged) => debug!("purged {} expired rate windows", purged),
				Err(err) => warn!("rate window purge failed: {}", err),
			}
		}
	});
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		error!("Cannot listen for shutdown signal: {}", err);
		std::future::pending::<()>().await;
	}
}

// vim: ts=4
