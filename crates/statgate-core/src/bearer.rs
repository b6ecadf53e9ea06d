//! Bearer credential extraction

use axum::http::{HeaderMap, header};

const BEARER_PREFIX: &str = "Bearer ";

/// Returns the bearer credential from the first `Authorization` header.
///
/// The scheme marker is matched case-sensitively and must be followed by a
/// single space; the remainder is trimmed. `None` when the header is absent,
/// not valid UTF-8, or uses another scheme.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
	let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
	value.strip_prefix(BEARER_PREFIX).map(str::trim)
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::http::HeaderValue;

	fn headers_with(values: &[&'static str]) -> HeaderMap {
		let mut headers = HeaderMap::new();
		for value in values {
			headers.append(header::AUTHORIZATION, HeaderValue::from_static(value));
		}
		headers
	}

	#[test]
	fn test_extracts_and_trims() {
		let headers = headers_with(&["Bearer   abc123  "]);
		assert_eq!(extract_bearer(&headers), Some("abc123"));
	}

	#[test]
	fn test_first_header_wins() {
		let headers = headers_with(&["Bearer first", "Bearer second"]);
		assert_eq!(extract_bearer(&headers), Some("first"));

		let headers = headers_with(&["Basic dXNlcjpwYXNz", "Bearer second"]);
		assert_eq!(extract_bearer(&headers), None);
	}

	#[test]
	fn test_rejects_other_shapes() {
		assert_eq!(extract_bearer(&HeaderMap::new()), None);
		for value in ["", "Bearer", "bearer abc", "BEARER abc", "Token abc", "Basic abc", " Bearer abc"] {
			let headers = headers_with(&[value]);
			assert_eq!(extract_bearer(&headers), None, "{:?} should not yield a credential", value);
		}
	}

	#[test]
	fn test_non_utf8_header() {
		let mut headers = HeaderMap::new();
		let value = HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap_or(HeaderValue::from_static(""));
		headers.insert(header::AUTHORIZATION, value);
		assert_eq!(extract_bearer(&headers), None);
	}

	#[test]
	fn test_empty_credential_after_prefix() {
		let headers = headers_with(&["Bearer    "]);
		assert_eq!(extract_bearer(&headers), Some(""));
	}
}

// vim: ts=4
