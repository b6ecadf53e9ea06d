//! Stats API auth middleware

use axum::{
	body::Body,
	extract::{Query, State},
	http::Request,
	middleware::Next,
	response::{IntoResponse, Response},
};
use tracing::Instrument;

use crate::authorization::Authorization;
use crate::extract::AuthorizedSite;
use crate::pipeline::authorize;
use crate::prelude::*;

/// First `site_id` pair of the query string. Repeated keys are not an error.
fn site_id_param(req: &Request<Body>) -> Option<String> {
	let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(req.uri()).ok()?;
	pairs.into_iter().find(|(key, _)| key == "site_id").map(|(_, value)| value)
}

/// Gates a Stats API route.
///
/// The site is named by the `site_id` query parameter. On success the
/// resolved site is stored in the request extensions (see [`AuthorizedSite`])
/// and the rest of the request runs inside a span carrying the site identity.
pub async fn require_stats_api(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> SgResult<Response<Body>> {
	let site_id = site_id_param(&req);

	let authorization = authorize(&app, req.headers(), site_id.as_deref())
		.await
		.inspect_err(|err| error!("stats api authorization failed: {}", err))?;

	match authorization {
		Authorization::Authorized(site) => {
			let span = tracing::info_span!(
				"stats_api",
				site.id = %site.site_id,
				site.domain = %site.domain,
			);
			req.extensions_mut().insert(AuthorizedSite(site));
			Ok(next.run(req).instrument(span).await)
		}
		Authorization::Denied(denial) => {
			debug!(reason = %denial, path = %req.uri().path(), "stats api request denied");
			Ok(denial.into_response())
		}
	}
}

// vim: ts=4
