//! Database schema initialization
//!
//! Creates tables and indexes if they do not exist yet.

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Users
	//*******
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS users (
		user_id integer NOT NULL,
		email text,
		super_admin boolean NOT NULL DEFAULT 0,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS user_features (
		user_id integer NOT NULL,
		feature text NOT NULL,
		PRIMARY KEY(user_id, feature)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// API keys
	//**********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS api_keys (
		key_id integer NOT NULL,
		user_id integer NOT NULL,
		name text NOT NULL,
		key_hash text NOT NULL,
		hourly_request_limit integer NOT NULL DEFAULT 600,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(key_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_api_keys_hash ON api_keys(key_hash)")
		.execute(&mut *tx)
		.await?;

	// Sites
	//*******
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS sites (
		site_id integer NOT NULL,
		domain text NOT NULL,
		domain_changed_from text,
		locked boolean NOT NULL DEFAULT 0,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(site_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_sites_domain ON sites(domain)")
		.execute(&mut *tx)
		.await?;

	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_sites_domain_changed_from ON sites(domain_changed_from)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS site_memberships (
		site_id integer NOT NULL,
		user_id integer NOT NULL,
		role text NOT NULL DEFAULT 'viewer',
		PRIMARY KEY(site_id, user_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Rate limit windows
	//********************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS rate_windows (
		key text NOT NULL,
		window_start integer NOT NULL,
		window_end integer NOT NULL,
		count integer NOT NULL,
		PRIMARY KEY(key)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_rate_windows_end ON rate_windows(window_end)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
