//! Site access policy for a resolved API key
//!
//! The policy is an ordered list of guards. Each guard either decides
//! (allow or deny) or passes to the next one; when every guard passes the
//! request is denied as `InvalidApiKey`. The order is part of the contract:
//!
//! 1. super admins are always allowed
//! 2. a locked site blocks everyone else
//! 3. the owner's plan must include the Stats API
//! 4. the owner must be a member of the site

use statgate_types::auth_adapter::{ApiKey, AuthAdapter, Feature};
use statgate_types::meta_adapter::{MetaAdapter, Site};

use crate::authorization::{Authorization, Denial};
use crate::prelude::*;

/// One step of the access policy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
	SuperAdmin,
	SiteLocked,
	Entitlement,
	Membership,
}

/// Guards in evaluation order
pub const GUARDS: [Guard; 4] = [Guard::SuperAdmin, Guard::SiteLocked, Guard::Entitlement, Guard::Membership];

/// What a single guard concluded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
	Allow,
	Deny(Denial),
	/// No decision, ask the next guard
	Continue,
}

/// Collaborators the access policy reads from
pub struct AccessEvaluator<'a> {
	pub auth_adapter: &'a dyn AuthAdapter,
	pub meta_adapter: &'a dyn MetaAdapter,
}

impl AccessEvaluator<'_> {
	/// Decides whether `api_key` may read stats of the site named `site_identifier`.
	///
	/// A missing identifier is rejected before any lookup. An identifier that
	/// resolves to no site is reported as `InvalidApiKey`, the same reason as a
	/// site the key cannot access.
	pub async fn evaluate(&self, api_key: &ApiKey, site_identifier: Option<&str>) -> SgResult<Authorization> {
		let Some(site_identifier) = site_identifier.filter(|id| !id.is_empty()) else {
			return Ok(Denial::MissingSiteId.into());
		};

		let Some(site) = self.meta_adapter.find_site_by_domain_or_alias(site_identifier).await? else {
			debug!(site_id = %site_identifier, "no site for identifier");
			return Ok(Denial::InvalidApiKey.into());
		};

		for guard in GUARDS {
			match self.check(guard, api_key, &site).await? {
				GuardOutcome::Allow => return Ok(Authorization::Authorized(site)),
				GuardOutcome::Deny(denial) => return Ok(denial.into()),
				GuardOutcome::Continue => {}
			}
		}

		Ok(Denial::InvalidApiKey.into())
	}

	/// Runs a single guard. Collaborators are only queried when the guard is reached.
	pub async fn check(&self, guard: Guard, api_key: &ApiKey, site: &Site) -> SgResult<GuardOutcome> {
		let user_id = api_key.user_id;
		let outcome = match guard {
			Guard::SuperAdmin => {
				if self.auth_adapter.is_super_admin(user_id).await? {
					GuardOutcome::Allow
				} else {
					GuardOutcome::Continue
				}
			}
			Guard::SiteLocked => {
				if self.meta_adapter.is_locked(site).await? {
					GuardOutcome::Deny(Denial::SiteLocked)
				} else {
					GuardOutcome::Continue
				}
			}
			Guard::Entitlement => {
				if self.auth_adapter.has_feature(user_id, Feature::StatsApi).await? {
					GuardOutcome::Continue
				} else {
					GuardOutcome::Deny(Denial::UpgradeRequired)
				}
			}
			Guard::Membership => {
				if self.meta_adapter.is_member(user_id, site).await? {
					GuardOutcome::Allow
				} else {
					GuardOutcome::Continue
				}
			}
		};
		Ok(outcome)
	}
}


// vim: ts=4
