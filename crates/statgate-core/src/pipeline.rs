//! Authorization pipeline
//!
//! Extract -> Resolve -> RateLimit -> AccessEvaluate. Each gate either hands
//! over to the next one or ends the request with a denial; only a request
//! that passes all four is authorized.

use axum::http::HeaderMap;

use crate::access::AccessEvaluator;
use crate::app::AppState;
use crate::authorization::{Authorization, Denial};
use crate::bearer::extract_bearer;
use crate::prelude::*;
use crate::rate_limit::{API_REQUEST_WINDOW, RateDecision, api_request_key};

/// Decides whether a Stats API request may proceed.
///
/// Denials are returned as `Ok(Authorization::Denied(_))`. `Err` means a
/// collaborator failed and no decision could be made.
pub async fn authorize(
	app: &AppState,
	headers: &HeaderMap,
	site_identifier: Option<&str>,
) -> SgResult<Authorization> {
	let Some(token) = extract_bearer(headers) else {
		return Ok(Denial::MissingApiKey.into());
	};

	let Some(api_key) = app.auth_adapter.find_api_key_by_token(token).await? else {
		return Ok(Denial::InvalidApiKey.into());
	};

	let decision = app
		.rate_limiter
		.check(&api_request_key(api_key.key_id), API_REQUEST_WINDOW, api_key.hourly_request_limit)
		.await?;
	if let RateDecision::Deny { ceiling } = decision {
		return Ok(Denial::RateLimit { ceiling }.into());
	}

	let evaluator = AccessEvaluator {
		auth_adapter: app.auth_adapter.as_ref(),
		meta_adapter: app.meta_adapter.as_ref(),
	};
	evaluator.evaluate(&api_key, site_identifier).await
}


// vim: ts=4
