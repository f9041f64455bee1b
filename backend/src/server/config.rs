//! Server configuration resolved from [`ApiSettings`].

use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::Authenticator;
use crate::inbound::http::state::HttpState;
use crate::outbound::InMemorySiteProvisioner;
use crate::settings::{ApiSettings, SettingsError};

/// Everything the HTTP server needs to start.
#[derive(Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    /// Pair a listen address with prepared handler state.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state,
        }
    }

    /// Resolve settings into adapters and handler state.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when any setting is malformed or the users
    /// file cannot be loaded.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, SettingsError> {
        let directory = settings.user_directory()?;
        let http_state = HttpState::new(
            Authenticator::new(Arc::new(directory)),
            Arc::new(InMemorySiteProvisioner::default()),
            settings.network_config()?,
        )
        .with_current_site(settings.current_site()?)
        .with_credential_headers(settings.credential_headers()?);
        Ok(Self::new(settings.bind_addr()?, http_state))
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Handler state shared by every worker.
    #[must_use]
    pub fn http_state(&self) -> &HttpState {
        &self.http_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AddressingMode;
    use rstest::rstest;

    #[rstest]
    fn resolves_defaults() {
        let config = ServerConfig::from_settings(&ApiSettings::default()).expect("config");
        assert_eq!(config.bind_addr().port(), 8080);
        assert_eq!(
            config.http_state().network.mode(),
            AddressingMode::Subdomain
        );
        assert!(config.http_state().current_site.is_none());
    }

    #[rstest]
    fn propagates_setting_errors() {
        let settings = ApiSettings {
            network_domain: Some("bad domain".into()),
            ..ApiSettings::default()
        };
        assert!(matches!(
            ServerConfig::from_settings(&settings),
            Err(SettingsError::NetworkRoot(_))
        ));
    }
}
