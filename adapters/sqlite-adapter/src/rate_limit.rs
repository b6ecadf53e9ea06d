//! Durable fixed-window counters
//!
//! The check-and-increment is a single UPSERT: the row is reset when a later
//! window starts, incremented while below the ceiling, and left untouched (no
//! row returned) once the ceiling is reached. A request from an earlier
//! window counts against the stored one. SQLite runs the statement
//! atomically, so concurrent requests cannot overshoot.

use sqlx::SqlitePool;

use statgate_types::prelude::*;
use statgate_types::rate_limit_store::{RateDecision, Window};

fn to_i64(value: u64) -> i64 {
	i64::try_from(value).unwrap_or(i64::MAX)
}

pub async fn check_and_increment(
	db: &SqlitePool,
	key: &str,
	window: Window,
	ceiling: u32,
) -> SgResult<RateDecision> {
	if ceiling == 0 {
		return Ok(RateDecision::Deny { ceiling });
	}

	let count: Option<i64> = sqlx::query_scalar(
		"INSERT INTO rate_windows (key, window_start, window_end, count)
			VALUES (?1, ?2, ?3, 1)
			ON CONFLICT(key) DO UPDATE SET
				count = CASE WHEN excluded.window_start > window_start THEN 1 ELSE count + 1 END,
				window_start = max(window_start, excluded.window_start),
				window_end = max(window_end, excluded.window_end)
			WHERE excluded.window_start > window_start OR count < ?4
			RETURNING count",
	)
	.bind(key)
	.bind(to_i64(window.start_ms))
	.bind(to_i64(window.end_ms()))
	.bind(i64::from(ceiling))
	.fetch_optional(db)
	.await
	.map_err(|e| {
		error!("Failed to update rate window: {}", e);
		Error::DbError
	})?;

	Ok(match count {
		Some(_) => RateDecision::Allow,
		None => RateDecision::Deny { ceiling },
	})
}

pub async fn purge_expired(db: &SqlitePool, now_ms: u64) -> SgResult<usize> {
	let result = sqlx::query("DELETE FROM rate_windows WHERE window_end <= ?")
		.bind(to_i64(now_ms))
		.execute(db)
		.await
		.map_err(|e| {
			error!("Failed to purge rate windows: {}", e);
			Error::DbError
		})?;

	Ok(usize::try_from(result.rows_affected()).unwrap_or(usize::MAX))
}

// vim: ts=4
