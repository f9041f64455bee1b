//! In-memory site provisioner.
//!
//! Keeps created sites in a map keyed by address. Identifiers are assigned
//! sequentially starting at [`FIRST_SITE_ID`]; identifier 1 belongs to the
//! network root site.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{SiteProvisioner, SiteProvisionerError};
use crate::domain::{NetworkUser, NewSite, ProvisionedSite, SiteAddress};

/// Identifier given to the first provisioned site.
pub const FIRST_SITE_ID: u64 = 2;

#[derive(Debug)]
struct Registry {
    next_id: u64,
    sites: HashMap<SiteAddress, ProvisionedSite>,
}

/// Provisioner that records sites in process memory.
#[derive(Debug)]
pub struct InMemorySiteProvisioner {
    registry: Mutex<Registry>,
}

impl Default for InMemorySiteProvisioner {
    fn default() -> Self {
        Self {
            registry: Mutex::new(Registry {
                next_id: FIRST_SITE_ID,
                sites: HashMap::new(),
            }),
        }
    }
}

impl InMemorySiteProvisioner {
    fn lock(&self) -> Result<MutexGuard<'_, Registry>, SiteProvisionerError> {
        self.registry
            .lock()
            .map_err(|_| SiteProvisionerError::backend("site registry lock poisoned"))
    }
}

#[async_trait]
impl SiteProvisioner for InMemorySiteProvisioner {
    async fn create_site(
        &self,
        site: NewSite,
        requested_by: &NetworkUser,
    ) -> Result<ProvisionedSite, SiteProvisionerError> {
        let mut registry = self.lock()?;
        if registry.sites.contains_key(&site.address) {
            return Err(SiteProvisionerError::already_exists(
                site.address.domain(),
                site.address.path(),
            ));
        }
        let id = registry.next_id;
        registry.next_id += 1;
        let provisioned = ProvisionedSite {
            id,
            title: site.title,
            address: site.address.clone(),
        };
        registry.sites.insert(site.address, provisioned.clone());
        info!(
            site_id = id,
            admin_email = site.admin_email.as_str(),
            owner = requested_by.login.as_str(),
            "registered site"
        );
        Ok(provisioned)
    }
}
