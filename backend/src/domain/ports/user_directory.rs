//! Driven port for looking up network users and their permissions.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Capability, NetworkUser};

/// Errors raised by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserDirectoryError {
    /// The backing store could not be read.
    #[error("user directory unavailable: {message}")]
    Unavailable {
        /// Adapter-specific description.
        message: String,
    },
    /// A stored record could not be decoded.
    #[error("user directory record is malformed: {message}")]
    Malformed {
        /// Adapter-specific description.
        message: String,
    },
}

impl UserDirectoryError {
    /// Helper for unavailable backends.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for undecodable records.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Lookup of network users by login, with credential and capability checks.
///
/// The three operations mirror the three questions the authenticator asks in
/// order; an adapter never has to decide whether a request is allowed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return the user registered under `login`, or `None` if there is none.
    async fn find_by_login(&self, login: &str) -> Result<Option<NetworkUser>, UserDirectoryError>;

    /// Check `password` against the credential stored for `user`.
    async fn check_password(
        &self,
        user: &NetworkUser,
        password: &str,
    ) -> Result<bool, UserDirectoryError>;

    /// Report whether `user` holds `capability`.
    async fn has_capability(
        &self,
        user: &NetworkUser,
        capability: Capability,
    ) -> Result<bool, UserDirectoryError>;
}
