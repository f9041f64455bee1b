//! Authentication primitives: credentials, capabilities, and network users.
//!
//! Header parsing stays in the HTTP adapter; this module only exposes
//! constructors that reject blank inputs before a directory lookup happens.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Reasons a credential pair is rejected before lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username was missing or only whitespace.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Username and password supplied with a request.
///
/// ## Invariants
/// - `username` is kept verbatim and is not blank.
/// - `password` is non-empty and kept verbatim; its buffer is zeroed on drop.
///
/// # Examples
/// ```
/// use multisite_json_api::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("admin", "password").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert!(Credentials::try_from_parts("  ", "password").is_err());
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        if username.trim().is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for directory lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Permission a network user may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Create and administer sites across the network.
    ManageSites,
}

/// User record owned by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkUser {
    /// Directory-assigned numeric identifier.
    pub id: u64,
    /// Login name, matched against [`Credentials::username`].
    pub login: String,
    /// Name shown in logs and responses.
    pub display_name: String,
}
