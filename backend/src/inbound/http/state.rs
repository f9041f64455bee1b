//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle through `actix_web::web::Data`, so they only
//! depend on domain services and ports and can be exercised without I/O.

use std::sync::Arc;

use crate::domain::ports::SiteProvisioner;
use crate::domain::{Authenticator, NetworkConfig, SiteRecord};

use super::auth::CredentialHeaders;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential and capability checks.
    pub authenticator: Authenticator,
    /// Creates the site once a request is validated.
    pub provisioner: Arc<dyn SiteProvisioner>,
    /// Addressing mode and network root.
    pub network: NetworkConfig,
    /// Base site for new addresses; the network root when `None`.
    pub current_site: Option<SiteRecord>,
    /// Where credentials are read from.
    pub credential_headers: CredentialHeaders,
}

impl HttpState {
    /// Construct state with default credential headers and no current site.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use multisite_json_api::domain::{AddressingMode, Authenticator, NetworkConfig};
    /// use multisite_json_api::inbound::http::state::HttpState;
    /// use multisite_json_api::outbound::{InMemorySiteProvisioner, InMemoryUserDirectory};
    ///
    /// let state = HttpState::new(
    ///     Authenticator::new(Arc::new(InMemoryUserDirectory::fixture()?)),
    ///     Arc::new(InMemorySiteProvisioner::default()),
    ///     NetworkConfig::with_default_root(AddressingMode::Subdomain),
    /// );
    /// assert!(state.current_site.is_none());
    /// # Ok::<(), multisite_json_api::domain::ports::UserDirectoryError>(())
    /// ```
    pub fn new(
        authenticator: Authenticator,
        provisioner: Arc<dyn SiteProvisioner>,
        network: NetworkConfig,
    ) -> Self {
        Self {
            authenticator,
            provisioner,
            network,
            current_site: None,
            credential_headers: CredentialHeaders::default(),
        }
    }

    /// Use `site` as the base for new addresses.
    pub fn with_current_site(mut self, site: Option<SiteRecord>) -> Self {
        self.current_site = site;
        self
    }

    /// Read credentials from `headers` instead of the defaults.
    pub fn with_credential_headers(mut self, headers: CredentialHeaders) -> Self {
        self.credential_headers = headers;
        self
    }
}
