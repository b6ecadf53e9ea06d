//! Adapter that stores sites and their memberships.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::prelude::*;

/// A tracked site
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
	pub site_id: SiteId,
	pub domain: Box<str>,
	/// Domain the site had before its last rename
	pub domain_changed_from: Option<Box<str>>,
	/// Set externally when the owner's subscription lapses
	pub locked: bool,
}

impl Site {
	/// Whether `identifier` names this site, either by current or previous domain
	pub fn answers_to(&self, identifier: &str) -> bool {
		self.domain.as_ref() == identifier || self.domain_changed_from.as_deref() == Some(identifier)
	}
}

#[async_trait]
pub trait MetaAdapter: Debug + Send + Sync {
	/// Resolves a site by its current domain, falling back to the domain it
	/// had before a rename. A current-domain match always wins.
	async fn find_site_by_domain_or_alias(&self, identifier: &str) -> SgResult<Option<Site>>;

	/// Whether the user owns or is a member of the site
	async fn is_member(&self, user_id: UserId, site: &Site) -> SgResult<bool>;

	async fn is_locked(&self, site: &Site) -> SgResult<bool> {
		Ok(site.locked)
	}
}


// vim: ts=4
