//! Site lookup and membership

use sqlx::SqlitePool;

use statgate_types::meta_adapter::Site;
use statgate_types::prelude::*;

/// Row type for site lookups (site_id, domain, domain_changed_from, locked)
type SiteRow = (i64, String, Option<String>, bool);

/// Finds a site by current domain, or by the domain it was renamed from.
/// A current-domain match is preferred when both exist.
pub async fn find_site_by_domain_or_alias(db: &SqlitePool, identifier: &str) -> SgResult<Option<Site>> {
	let row: Option<SiteRow> = sqlx::query_as(
		"SELECT site_id, domain, domain_changed_from, locked
			FROM sites
			WHERE domain = ?1 OR domain_changed_from = ?1
			ORDER BY domain = ?1 DESC, site_id
			LIMIT 1",
	)
	.bind(identifier)
	.fetch_optional(db)
	.await
	.map_err(|e| {
		error!("Failed to query site: {}", e);
		Error::DbError
	})?;

	Ok(row.map(|(site_id, domain, domain_changed_from, locked)| Site {
		site_id: SiteId(site_id),
		domain: domain.into(),
		domain_changed_from: domain_changed_from.map(Into::into),
		locked,
	}))
}

pub async fn is_member(db: &SqlitePool, user_id: UserId, site_id: SiteId) -> SgResult<bool> {
	let found: Option<i64> =
		sqlx::query_scalar("SELECT 1 FROM site_memberships WHERE site_id = ? AND user_id = ?")
			.bind(site_id.0)
			.bind(user_id.0)
			.fetch_optional(db)
			.await
			.map_err(|e| {
				error!("Failed to query site membership: {}", e);
				Error::DbError
			})?;

	Ok(found.is_some())
}

/// Current lock flag. A site deleted since it was resolved reads as locked.
pub async fn is_locked(db: &SqlitePool, site_id: SiteId) -> SgResult<bool> {
	let locked: Option<bool> = sqlx::query_scalar("SELECT locked FROM sites WHERE site_id = ?")
		.bind(site_id.0)
		.fetch_optional(db)
		.await
		.map_err(|e| {
			error!("Failed to query site lock: {}", e);
			Error::DbError
		})?;

	Ok(locked.unwrap_or(true))
}

// vim: ts=4
