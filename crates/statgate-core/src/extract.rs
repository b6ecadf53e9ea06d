//! Custom extractors for statgate-specific data

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::prelude::*;
use statgate_types::meta_adapter::Site;

// AuthorizedSite //
//****************//
/// Site resolved by the Stats API middleware.
///
/// Only available on routes behind [`crate::middleware::require_stats_api`].
#[derive(Debug, Clone)]
pub struct AuthorizedSite(pub Site);

impl<S> FromRequestParts<S> for AuthorizedSite
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(site) = parts.extensions.get::<AuthorizedSite>().cloned() {
			Ok(site)
		} else {
			error!("AuthorizedSite extracted on a route without the stats api middleware");
			Err(Error::Internal("no authorized site in request".into()))
		}
	}
}

// vim: ts=4
