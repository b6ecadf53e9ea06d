//! SQLite adapters for statgate
//!
//! A single database file backs the API key lookup ([`AuthAdapter`]), the
//! site repository ([`MetaAdapter`]) and durable rate-limit windows
//! ([`RateLimitStore`]).

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;
use std::time::Duration;

use statgate_types::auth_adapter::{ApiKey, AuthAdapter, Feature};
use statgate_types::meta_adapter::{MetaAdapter, Site};
use statgate_types::prelude::*;
use statgate_types::rate_limit_store::{RateDecision, RateLimitStore, Window};

mod api_key;
mod rate_limit;
mod schema;
mod site;

pub use api_key::hash_api_key;

#[derive(Debug, Clone)]
pub struct SqliteAdapter {
	db: SqlitePool,
}

impl SqliteAdapter {
	pub async fn new(path: impl AsRef<Path>) -> SgResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal)
			.busy_timeout(Duration::from_secs(5));
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		info!("sqlite adapter opened {}", path.as_ref().display());
		Ok(Self { db })
	}

	/// Underlying pool, for provisioning tools that write keys and sites
	pub fn pool(&self) -> &SqlitePool {
		&self.db
	}
}

#[async_trait]
impl AuthAdapter for SqliteAdapter {
	async fn find_api_key_by_token(&self, token: &str) -> SgResult<Option<ApiKey>> {
		api_key::find_api_key_by_token(&self.db, token).await
	}

	async fn has_feature(&self, user_id: UserId, feature: Feature) -> SgResult<bool> {
		api_key::has_feature(&self.db, user_id, feature).await
	}

	async fn is_super_admin(&self, user_id: UserId) -> SgResult<bool> {
		api_key::is_super_admin(&self.db, user_id).await
	}
}

#[async_trait]
impl MetaAdapter for SqliteAdapter {
	async fn find_site_by_domain_or_alias(&self, identifier: &str) -> SgResult<Option<Site>> {
		site::find_site_by_domain_or_alias(&self.db, identifier).await
	}

	async fn is_member(&self, user_id: UserId, site: &Site) -> SgResult<bool> {
		site::is_member(&self.db, user_id, site.site_id).await
	}

	async fn is_locked(&self, site: &Site) -> SgResult<bool> {
		site::is_locked(&self.db, site.site_id).await
	}
}

#[async_trait]
impl RateLimitStore for SqliteAdapter {
	async fn check_and_increment(
		&self,
		key: &str,
		window: Window,
		ceiling: u32,
	) -> SgResult<RateDecision> {
		rate_limit::check_and_increment(&self.db, key, window, ceiling).await
	}

	async fn purge_expired(&self, now_ms: u64) -> SgResult<usize> {
		rate_limit::purge_expired(&self.db, now_ms).await
	}
}

// vim: ts=4
