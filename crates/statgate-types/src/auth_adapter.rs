//! Adapter that resolves API keys and answers questions about their owners.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// A Stats API key as seen by the gate. Immutable once issued.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
	pub key_id: KeyId,
	/// Owner of the key, all access checks are made for this user
	pub user_id: UserId,
	pub name: Box<str>,
	/// Requests allowed per hour window
	pub hourly_request_limit: u32,
}

/// Features a user's subscription may entitle them to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
	StatsApi,
}

impl Feature {
	pub fn as_str(self) -> &'static str {
		match self {
			Feature::StatsApi => "stats_api",
		}
	}
}

impl std::fmt::Display for Feature {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[async_trait]
pub trait AuthAdapter: Debug + Send + Sync {
	/// Looks up a key by the plaintext bearer token.
	///
	/// Returns `Ok(None)` if no key matches. Storage failures are errors.
	async fn find_api_key_by_token(&self, token: &str) -> SgResult<Option<ApiKey>>;

	/// Whether the user's subscription currently includes `feature`
	async fn has_feature(&self, user_id: UserId, feature: Feature) -> SgResult<bool>;

	async fn is_super_admin(&self, user_id: UserId) -> SgResult<bool>;
}


// vim: ts=4
