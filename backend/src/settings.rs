//! Runtime configuration loaded via OrthoConfig.
//!
//! Values are layered from defaults, an optional config file, `MULTISITE_*`
//! environment variables, and command-line flags. Accessors resolve the raw
//! values into the typed configuration the adapters need.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::http::header::InvalidHeaderName;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::UserDirectoryError;
use crate::domain::{
    AddressingMode, DEFAULT_NETWORK_DOMAIN, DEFAULT_NETWORK_PATH, NetworkConfig, SiteRecord,
    SiteRecordError,
};
use crate::inbound::http::auth::{CredentialHeaders, DEFAULT_PASSWORD_HEADER, DEFAULT_USER_HEADER};
use crate::outbound::InMemoryUserDirectory;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while resolving [`ApiSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },
    /// The network root site is malformed.
    #[error("invalid network root: {0}")]
    NetworkRoot(#[source] SiteRecordError),
    /// The current site is malformed or only half configured.
    #[error("invalid current site: {0}")]
    CurrentSite(#[source] SiteRecordError),
    /// A credential header name is not a valid HTTP header name.
    #[error("invalid credential header name: {0}")]
    HeaderName(#[from] InvalidHeaderName),
    /// The users file could not be loaded.
    #[error(transparent)]
    Users(#[from] UserDirectoryError),
    /// Release builds refuse to start with the fixture accounts.
    #[error("no users file configured; set MULTISITE_USERS_FILE")]
    MissingUsersFile,
}

/// Settings for the site creation API.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MULTISITE")]
pub struct ApiSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Place new sites under a path of the network domain instead of on a
    /// subdomain.
    #[ortho_config(default = false)]
    pub subdirectory_install: bool,
    /// Domain of the network root site.
    pub network_domain: Option<String>,
    /// Path of the network root site.
    pub network_path: Option<String>,
    /// Domain of the site new addresses are derived from.
    pub current_site_domain: Option<String>,
    /// Path of the site new addresses are derived from.
    pub current_site_path: Option<String>,
    /// Header carrying the login name.
    pub user_header: Option<String>,
    /// Header carrying the password.
    pub password_header: Option<String>,
    /// JSON file of user accounts.
    pub users_file: Option<PathBuf>,
}

impl ApiSettings {
    /// Socket address to listen on, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Addressing mode selected by `subdirectory_install`.
    pub fn addressing_mode(&self) -> AddressingMode {
        if self.subdirectory_install {
            AddressingMode::Subdirectory
        } else {
            AddressingMode::Subdomain
        }
    }

    /// Network configuration built from the mode and root site.
    pub fn network_config(&self) -> Result<NetworkConfig, SettingsError> {
        let root = SiteRecord::new(
            self.network_domain.as_deref().unwrap_or(DEFAULT_NETWORK_DOMAIN),
            self.network_path.as_deref().unwrap_or(DEFAULT_NETWORK_PATH),
        )
        .map_err(SettingsError::NetworkRoot)?;
        Ok(NetworkConfig::new(self.addressing_mode(), root))
    }

    /// Current site, if a domain is configured. A path without a domain is
    /// rejected; a domain without a path sits at `/`.
    pub fn current_site(&self) -> Result<Option<SiteRecord>, SettingsError> {
        match (&self.current_site_domain, &self.current_site_path) {
            (None, None) => Ok(None),
            (None, Some(_)) => Err(SettingsError::CurrentSite(SiteRecordError::EmptyDomain)),
            (Some(domain), path) => SiteRecord::new(
                domain.as_str(),
                path.as_deref().unwrap_or(DEFAULT_NETWORK_PATH),
            )
            .map(Some)
            .map_err(SettingsError::CurrentSite),
        }
    }

    /// Credential header names.
    pub fn credential_headers(&self) -> Result<CredentialHeaders, SettingsError> {
        Ok(CredentialHeaders::new(
            self.user_header.as_deref().unwrap_or(DEFAULT_USER_HEADER),
            self.password_header
                .as_deref()
                .unwrap_or(DEFAULT_PASSWORD_HEADER),
        )?)
    }

    /// User directory loaded from `users_file`.
    ///
    /// Without a file, debug builds fall back to
    /// [`InMemoryUserDirectory::fixture`] and release builds fail.
    pub fn user_directory(&self) -> Result<InMemoryUserDirectory, SettingsError> {
        match &self.users_file {
            Some(path) => Ok(InMemoryUserDirectory::from_json_file(path)?),
            None if cfg!(debug_assertions) => Ok(InMemoryUserDirectory::fixture()?),
            None => Err(SettingsError::MissingUsersFile),
        }
    }
}
