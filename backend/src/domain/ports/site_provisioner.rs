//! Driven port for creating sites in the network.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NetworkUser, NewSite, ProvisionedSite};

/// Errors raised by site provisioning adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteProvisionerError {
    /// A site already occupies the requested domain and path.
    #[error("a site already exists at {domain}{path}")]
    AlreadyExists {
        /// Domain of the existing site.
        domain: String,
        /// Path of the existing site.
        path: String,
    },
    /// The provisioning backend failed.
    #[error("site provisioning failed: {message}")]
    Backend {
        /// Adapter-specific description.
        message: String,
    },
}

impl SiteProvisionerError {
    /// Helper for address conflicts.
    pub fn already_exists(domain: impl Into<String>, path: impl Into<String>) -> Self {
        Self::AlreadyExists {
            domain: domain.into(),
            path: path.into(),
        }
    }

    /// Helper for backend failures.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Creates a site from an already validated request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteProvisioner: Send + Sync {
    /// Provision `site` on behalf of `requested_by`.
    async fn create_site(
        &self,
        site: NewSite,
        requested_by: &NetworkUser,
    ) -> Result<ProvisionedSite, SiteProvisionerError>;
}
