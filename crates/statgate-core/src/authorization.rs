//! Authorization outcome and its HTTP rendering

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use statgate_types::meta_adapter::Site;

/// Why a request was turned away. The set is closed.
///
/// A missing site and a site the caller cannot access both map to
/// `InvalidApiKey`, so responses never reveal which site identifiers exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Denial {
	MissingApiKey,
	MissingSiteId,
	InvalidApiKey,
	RateLimit { ceiling: u32 },
	UpgradeRequired,
	SiteLocked,
}

impl Denial {
	/// Stable reason code
	pub fn code(&self) -> &'static str {
		match self {
			Denial::MissingApiKey => "missing_api_key",
			Denial::MissingSiteId => "missing_site_id",
			Denial::InvalidApiKey => "invalid_api_key",
			Denial::RateLimit { .. } => "rate_limit",
			Denial::UpgradeRequired => "upgrade_required",
			Denial::SiteLocked => "site_locked",
		}
	}

	pub fn status(&self) -> StatusCode {
		match self {
			Denial::MissingApiKey | Denial::InvalidApiKey => StatusCode::UNAUTHORIZED,
			Denial::MissingSiteId => StatusCode::BAD_REQUEST,
			Denial::RateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
			Denial::UpgradeRequired | Denial::SiteLocked => StatusCode::PAYMENT_REQUIRED,
		}
	}

	pub fn message(&self) -> String {
		match self {
			Denial::MissingApiKey => {
				"Missing API key. Please use a valid API key as a Bearer Token.".into()
			}
			Denial::MissingSiteId => "Missing site ID. Please provide the required site_id parameter with your request.".into(),
			Denial::InvalidApiKey => "Invalid API key or site ID. Please make sure you're using a valid API key with access to the site you've requested.".into(),
			Denial::RateLimit { ceiling } => format!(
				"Too many API requests. Your API key is limited to {} requests per hour. Please contact us to request more capacity.",
				ceiling
			),
			Denial::UpgradeRequired => "The account that owns this API key does not have access to Stats API. Please make sure you're using the API key of a subscriber account and that the subscription is active".into(),
			Denial::SiteLocked => "This site is locked due to missing active subscription. In order to access it, the site owner should subscribe to a suitable plan".into(),
		}
	}
}

impl std::fmt::Display for Denial {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Denial::RateLimit { ceiling } => write!(f, "rate_limit({})", ceiling),
			_ => f.write_str(self.code()),
		}
	}
}

impl IntoResponse for Denial {
	fn into_response(self) -> Response {
		let body = serde_json::json!({ "error": self.message() });
		let mut response = (self.status(), Json(body)).into_response();

		if let Denial::RateLimit { ceiling } = self {
			response.headers_mut().insert("X-RateLimit-Limit", HeaderValue::from(ceiling));
		}
		if matches!(self, Denial::MissingApiKey | Denial::InvalidApiKey) {
			response
				.headers_mut()
				.insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
		}

		response
	}
}

/// Decision for one request: exactly one resolved site, or exactly one reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Authorization {
	Authorized(Site),
	Denied(Denial),
}

impl From<Denial> for Authorization {
	fn from(denial: Denial) -> Self {
		Authorization::Denied(denial)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_per_reason() {
		assert_eq!(Denial::MissingApiKey.status(), StatusCode::UNAUTHORIZED);
		assert_eq!(Denial::MissingSiteId.status(), StatusCode::BAD_REQUEST);
		assert_eq!(Denial::InvalidApiKey.status(), StatusCode::UNAUTHORIZED);
		assert_eq!(Denial::RateLimit { ceiling: 600 }.status(), StatusCode::TOO_MANY_REQUESTS);
		assert_eq!(Denial::UpgradeRequired.status(), StatusCode::PAYMENT_REQUIRED);
		assert_eq!(Denial::SiteLocked.status(), StatusCode::PAYMENT_REQUIRED);
	}

	#[test]
	fn test_rate_limit_message_carries_ceiling() {
		let denial = Denial::RateLimit { ceiling: 600 };
		assert!(denial.message().contains("limited to 600 requests per hour"));
		assert_eq!(denial.to_string(), "rate_limit(600)");
	}

	#[test]
	fn test_rate_limit_response_headers() {
		let response = Denial::RateLimit { ceiling: 10 }.into_response();
		assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
		assert_eq!(response.headers().get("X-RateLimit-Limit"), Some(&HeaderValue::from(10u32)));
	}
}

// vim: ts=4
