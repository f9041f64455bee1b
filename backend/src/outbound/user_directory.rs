//! In-memory user directory.
//!
//! Accounts are loaded once at startup, either from a JSON file or from the
//! built-in fixture, and never change afterwards. Passwords are held only as
//! Argon2 PHC strings, each with its own random salt.
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "login": "admin",
//!     "display_name": "Network Admin",
//!     "password_hash": "$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>",
//!     "capabilities": ["manage_sites"]
//!   }
//! ]
//! ```
//!
//! Use [`hash_password`] to produce `password_hash` values.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2};
use async_trait::async_trait;
use rand::rngs::OsRng;
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{Capability, NetworkUser};

/// On-disk account record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserRecord {
    /// Numeric user identifier.
    pub id: u64,
    /// Login name.
    pub login: String,
    /// Name shown in logs.
    pub display_name: String,
    /// Argon2 PHC string for the password.
    pub password_hash: String,
    /// Granted capabilities.
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

#[derive(Debug, Clone)]
struct Account {
    user: NetworkUser,
    password_hash: String,
    capabilities: HashSet<Capability>,
}

/// Directory backed by a map keyed on login.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    accounts: HashMap<String, Account>,
}

/// Hash `password` with Argon2id and a fresh random salt.
///
/// # Examples
/// ```
/// use multisite_json_api::outbound::hash_password;
///
/// let first = hash_password("s3cret")?;
/// let second = hash_password("s3cret")?;
/// assert!(first.starts_with("$argon2id$"));
/// assert_ne!(first, second);
/// # Ok::<(), multisite_json_api::domain::ports::UserDirectoryError>(())
/// ```
pub fn hash_password(password: &str) -> Result<String, UserDirectoryError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| UserDirectoryError::malformed(format!("hashing password: {err}")))
}

fn check_stored_hash(login: &str, stored: &str) -> Result<(), UserDirectoryError> {
    let parsed = PasswordHash::new(stored).map_err(|err| {
        UserDirectoryError::malformed(format!("password hash for `{login}`: {err}"))
    })?;
    Algorithm::try_from(parsed.algorithm).map_err(|err| {
        UserDirectoryError::malformed(format!("password hash for `{login}`: {err}"))
    })?;
    Ok(())
}

fn matches_stored_hash(stored: &str, password: &[u8]) -> Result<bool, UserDirectoryError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|err| UserDirectoryError::malformed(format!("stored password hash: {err}")))?;
    match Argon2::default().verify_password(password, &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(UserDirectoryError::malformed(format!(
            "stored password hash: {err}"
        ))),
    }
}

impl InMemoryUserDirectory {
    /// Empty directory; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account with a plaintext password, replacing any account with
    /// the same login. The password is hashed before it is stored.
    ///
    /// # Examples
    /// ```
    /// use multisite_json_api::domain::{Capability, NetworkUser};
    /// use multisite_json_api::outbound::InMemoryUserDirectory;
    ///
    /// let directory = InMemoryUserDirectory::new().with_account(
    ///     NetworkUser { id: 7, login: "ops".into(), display_name: "Ops".into() },
    ///     "s3cret",
    ///     [Capability::ManageSites],
    /// )?;
    /// assert_eq!(directory.len(), 1);
    /// # Ok::<(), multisite_json_api::domain::ports::UserDirectoryError>(())
    /// ```
    pub fn with_account(
        mut self,
        user: NetworkUser,
        password: &str,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Result<Self, UserDirectoryError> {
        let account = Account {
            password_hash: hash_password(password)?,
            capabilities: capabilities.into_iter().collect(),
            user,
        };
        self.accounts.insert(account.user.login.clone(), account);
        Ok(self)
    }

    /// Development accounts: `admin`/`password` may manage sites,
    /// `user`/`password` may not.
    pub fn fixture() -> Result<Self, UserDirectoryError> {
        Self::new()
            .with_account(
                NetworkUser {
                    id: 1,
                    login: "admin".to_owned(),
                    display_name: "Network Admin".to_owned(),
                },
                "password",
                [Capability::ManageSites],
            )?
            .with_account(
                NetworkUser {
                    id: 2,
                    login: "user".to_owned(),
                    display_name: "Regular User".to_owned(),
                },
                "password",
                [],
            )
    }

    /// Build a directory from decoded records.
    ///
    /// Fails on duplicate logins and on hashes that are not Argon2 PHC
    /// strings.
    pub fn from_records(
        records: impl IntoIterator<Item = UserRecord>,
    ) -> Result<Self, UserDirectoryError> {
        let mut accounts = HashMap::new();
        for record in records {
            check_stored_hash(&record.login, &record.password_hash)?;
            if accounts.contains_key(&record.login) {
                return Err(UserDirectoryError::malformed(format!(
                    "duplicate login `{}`",
                    record.login
                )));
            }
            let account = Account {
                user: NetworkUser {
                    id: record.id,
                    login: record.login.clone(),
                    display_name: record.display_name,
                },
                password_hash: record.password_hash,
                capabilities: record.capabilities.into_iter().collect(),
            };
            accounts.insert(record.login, account);
        }
        Ok(Self { accounts })
    }
    /// Parse a JSON array of [`UserRecord`]s.
    pub fn from_json_str(json: &str) -> Result<Self, UserDirectoryError> {
        let records: Vec<UserRecord> = serde_json::from_str(json)
            .map_err(|err| UserDirectoryError::malformed(err.to_string()))?;
        Self::from_records(records)
    }

    /// Load a JSON array of [`UserRecord`]s from `path`.
    pub fn from_json_file(path: &Path) -> Result<Self, UserDirectoryError> {
        let json = std::fs::read_to_string(path).map_err(|err| {
            UserDirectoryError::unavailable(format!("reading {}: {err}", path.display()))
        })?;
        let directory = Self::from_json_str(&json)?;
        debug!(path = %path.display(), accounts = directory.len(), "loaded user directory");
        Ok(directory)
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the directory has no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn account_for(&self, user: &NetworkUser) -> Option<&Account> {
        self.accounts
            .get(&user.login)
            .filter(|account| account.user.id == user.id)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_login(&self, login: &str) -> Result<Option<NetworkUser>, UserDirectoryError> {
        Ok(self.accounts.get(login).map(|account| account.user.clone()))
    }

    async fn check_password(
        &self,
        user: &NetworkUser,
        password: &str,
    ) -> Result<bool, UserDirectoryError> {
        let Some(account) = self.account_for(user) else {
            return Ok(false);
        };
        // CPU-bound; run on the blocking pool.
        let stored = account.password_hash.clone();
        let candidate = Zeroizing::new(password.as_bytes().to_vec());
        tokio::task::spawn_blocking(move || matches_stored_hash(&stored, &candidate))
            .await
            .map_err(|err| UserDirectoryError::unavailable(format!("password check: {err}")))?
    }

    async fn has_capability(
        &self,
        user: &NetworkUser,
        capability: Capability,
    ) -> Result<bool, UserDirectoryError> {
        Ok(self
            .account_for(user)
            .is_some_and(|account| account.capabilities.contains(&capability)))
    }
}
