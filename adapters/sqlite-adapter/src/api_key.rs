//! API key lookup and owner checks

use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use std::fmt::Write;

use statgate_types::auth_adapter::{ApiKey, Feature};
use statgate_types::prelude::*;

/// Row type for API key lookups (key_id, user_id, name, hourly_request_limit)
type ApiKeyRow = (i64, i64, String, i64);

/// Hex encoded SHA-256 of a plaintext key, the form keys are stored in
pub fn hash_api_key(key: &str) -> String {
	let digest = Sha256::digest(key.as_bytes());
	digest.iter().fold(String::with_capacity(64), |mut hex, byte| {
		let _ = write!(hex, "{:02x}", byte);
		hex
	})
}

pub async fn find_api_key_by_token(db: &SqlitePool, token: &str) -> SgResult<Option<ApiKey>> {
	let row: Option<ApiKeyRow> = sqlx::query_as(
		"SELECT key_id, user_id, name, hourly_request_limit
			FROM api_keys
			WHERE key_hash = ?",
	)
	.bind(hash_api_key(token))
	.fetch_optional(db)
	.await
	.map_err(|e| {
		error!("Failed to query API key: {}", e);
		Error::DbError
	})?;

	Ok(row.map(|(key_id, user_id, name, hourly_request_limit)| ApiKey {
		key_id: KeyId(key_id),
		user_id: UserId(user_id),
		name: name.into(),
		// A negative limit in the table means no requests at all
		hourly_request_limit: u32::try_from(hourly_request_limit).unwrap_or_default(),
	}))
}

pub async fn has_feature(db: &SqlitePool, user_id: UserId, feature: Feature) -> SgResult<bool> {
	let found: Option<i64> =
		sqlx::query_scalar("SELECT 1 FROM user_features WHERE user_id = ? AND feature = ?")
			.bind(user_id.0)
			.bind(feature.as_str())
			.fetch_optional(db)
			.await
			.map_err(|e| {
				error!("Failed to query user features: {}", e);
				Error::DbError
			})?;

	Ok(found.is_some())
}

pub async fn is_super_admin(db: &SqlitePool, user_id: UserId) -> SgResult<bool> {
	let super_admin: Option<bool> =
		sqlx::query_scalar("SELECT super_admin FROM users WHERE user_id = ?")
			.bind(user_id.0)
			.fetch_optional(db)
			.await
			.map_err(|e| {
				error!("Failed to query user: {}", e);
				Error::DbError
			})?;

	Ok(super_admin.unwrap_or(false))
}


// vim: ts=4
