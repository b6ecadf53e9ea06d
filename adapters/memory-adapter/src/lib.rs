//! In-memory adapters
//!
//! `MemoryAdapter` implements both [`AuthAdapter`] and [`MetaAdapter`] over
//! plain maps. It is seeded with builder methods and can be switched into a
//! failing mode to exercise infrastructure-error paths.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use statgate_types::auth_adapter::{ApiKey, AuthAdapter, Feature};
use statgate_types::meta_adapter::{MetaAdapter, Site};
use statgate_types::prelude::*;

#[derive(Debug, Default)]
struct Data {
	api_keys: HashMap<Box<str>, ApiKey>,
	features: HashMap<UserId, HashSet<Feature>>,
	super_admins: HashSet<UserId>,
	sites: Vec<Site>,
	memberships: HashSet<(UserId, SiteId)>,
}

#[derive(Debug, Default)]
pub struct MemoryAdapter {
	data: RwLock<Data>,
	failing: AtomicBool,
	site_lookups: AtomicUsize,
}

impl MemoryAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_api_key(self, token: &str, api_key: ApiKey) -> Self {
		self.data.write().api_keys.insert(token.into(), api_key);
		self
	}

	/// Registers a user with the given entitlements
	pub fn with_user(self, user_id: UserId, features: &[Feature]) -> Self {
		self.data.write().features.entry(user_id).or_default().extend(features.iter().copied());
		self
	}

	pub fn with_super_admin(self, user_id: UserId) -> Self {
		self.data.write().super_admins.insert(user_id);
		self
	}

	pub fn with_site(self, site: Site) -> Self {
		self.data.write().sites.push(site);
		self
	}

	pub fn with_member(self, user_id: UserId, site_id: SiteId) -> Self {
		self.data.write().memberships.insert((user_id, site_id));
		self
	}

	/// Makes every lookup fail with `ServiceUnavailable` while set
	pub fn fail_lookups(&self, failing: bool) {
		self.failing.store(failing, Ordering::SeqCst);
	}

	/// Number of site lookups served so far
	pub fn site_lookups(&self) -> usize {
		self.site_lookups.load(Ordering::SeqCst)
	}

	fn check_available(&self) -> SgResult<()> {
		if self.failing.load(Ordering::SeqCst) {
			return Err(Error::ServiceUnavailable("memory adapter switched off".into()));
		}
		Ok(())
	}
}

#[async_trait]
impl AuthAdapter for MemoryAdapter {
	async fn find_api_key_by_token(&self, token: &str) -> SgResult<Option<ApiKey>> {
		self.check_available()?;
		Ok(self.data.read().api_keys.get(token).cloned())
	}

	async fn has_feature(&self, user_id: UserId, feature: Feature) -> SgResult<bool> {
		self.check_available()?;
		Ok(self.data.read().features.get(&user_id).is_some_and(|f| f.contains(&feature)))
	}

	async fn is_super_admin(&self, user_id: UserId) -> SgResult<bool> {
		self.check_available()?;
		Ok(self.data.read().super_admins.contains(&user_id))
	}
}

#[async_trait]
impl MetaAdapter for MemoryAdapter {
	async fn find_site_by_domain_or_alias(&self, identifier: &str) -> SgResult<Option<Site>> {
		self.check_available()?;
		self.site_lookups.fetch_add(1, Ordering::SeqCst);

		let data = self.data.read();
		let site = data
			.sites
			.iter()
			.find(|site| site.domain.as_ref() == identifier)
			.or_else(|| {
				data.sites.iter().find(|site| site.domain_changed_from.as_deref() == Some(identifier))
			});
		Ok(site.cloned())
	}

	async fn is_member(&self, user_id: UserId, site: &Site) -> SgResult<bool> {
		self.check_available()?;
		Ok(self.data.read().memberships.contains(&(user_id, site.site_id)))
	}
}


// vim: ts=4
