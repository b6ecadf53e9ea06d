//! Error type for infrastructure failures.
//!
//! Authorization denials are not errors: they travel as values in
//! `Authorization::Denied`. This type only covers failures of the
//! collaborators (storage, configuration) so they are never reported as an
//! access decision.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub type SgResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	DbError,
	/// A collaborator could not be reached
	ServiceUnavailable(String),
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::DbError => write!(f, "database error"),
			Error::ServiceUnavailable(msg) => write!(f, "service unavailable: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Error::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
			Error::DbError | Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();
		// Details stay in the logs, the caller only learns the class of failure
		let message = match status {
			StatusCode::SERVICE_UNAVAILABLE => {
				"The service is temporarily unavailable. Please try again later."
			}
			_ => "Internal server error",
		};
		let body = serde_json::json!({ "error": message });
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
