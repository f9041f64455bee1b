//! Credential checks for site creation requests.
//!
//! A request is allowed when the user exists, the password matches, and the
//! user holds [`Capability::ManageSites`]. The caller only ever learns
//! "allowed" or "not allowed"; which check failed is logged but never
//! returned, so responses do not reveal which logins exist.

use std::sync::Arc;

use tracing::{debug, error};

use super::ports::{UserDirectory, UserDirectoryError};
use super::{Capability, Credentials, NetworkUser};

/// Authenticates credentials against a [`UserDirectory`].
#[derive(Clone)]
pub struct Authenticator {
    directory: Arc<dyn UserDirectory>,
}

impl Authenticator {
    /// Create an authenticator backed by `directory`.
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Return the user when every check passes, `None` otherwise.
    ///
    /// Directory failures are treated as a failed check.
    pub async fn authenticate(&self, credentials: &Credentials) -> Option<NetworkUser> {
        match self.verify(credentials).await {
            Ok(Some(user)) => Some(user),
            Ok(None) => None,
            Err(err) => {
                error!(error = %err, "user directory failed during authentication");
                None
            }
        }
    }

    async fn verify(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<NetworkUser>, UserDirectoryError> {
        let Some(user) = self.directory.find_by_login(credentials.username()).await? else {
            debug!("authentication failed: unknown login");
            return Ok(None);
        };

        if !self
            .directory
            .check_password(&user, credentials.password())
            .await?
        {
            debug!(user_id = user.id, "authentication failed: password mismatch");
            return Ok(None);
        }

        if !self
            .directory
            .has_capability(&user, Capability::ManageSites)
            .await?
        {
            debug!(user_id = user.id, "authentication failed: missing manage_sites");
            return Ok(None);
        }

        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserDirectory;
    use rstest::{fixture, rstest};

    #[fixture]
    fn admin() -> NetworkUser {
        NetworkUser {
            id: 1,
            login: "admin".to_owned(),
            display_name: "Network Admin".to_owned(),
        }
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials::try_from_parts(username, password).expect("valid credential shape")
    }

    fn directory_returning(user: Option<NetworkUser>) -> MockUserDirectory {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_login()
            .times(1)
            .return_once(move |_| Ok(user));
        directory
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_login_fails_without_checking_password() {
        let mut directory = directory_returning(None);
        directory.expect_check_password().never();
        directory.expect_has_capability().never();

        let result = Authenticator::new(Arc::new(directory))
            .authenticate(&credentials("fakeuser", "password"))
            .await;
        assert!(result.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_fails_without_checking_capability(admin: NetworkUser) {
        let mut directory = directory_returning(Some(admin));
        directory
            .expect_check_password()
            .withf(|_, password| password == "not the right password")
            .times(1)
            .return_once(|_, _| Ok(false));
        directory.expect_has_capability().never();

        let result = Authenticator::new(Arc::new(directory))
            .authenticate(&credentials("admin", "not the right password"))
            .await;
        assert!(result.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_capability_fails(admin: NetworkUser) {
        let mut directory = directory_returning(Some(admin));
        directory
            .expect_check_password()
            .return_once(|_, _| Ok(true));
        directory
            .expect_has_capability()
            .withf(|_, capability| *capability == Capability::ManageSites)
            .times(1)
            .return_once(|_, _| Ok(false));

        let result = Authenticator::new(Arc::new(directory))
            .authenticate(&credentials("user", "password"))
            .await;
        assert!(result.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn valid_admin_returns_user_record(admin: NetworkUser) {
        let expected = admin.clone();
        let mut directory = directory_returning(Some(admin));
        directory
            .expect_check_password()
            .return_once(|_, _| Ok(true));
        directory
            .expect_has_capability()
            .return_once(|_, _| Ok(true));

        let result = Authenticator::new(Arc::new(directory))
            .authenticate(&credentials("admin", "password"))
            .await;
        assert_eq!(result, Some(expected));
    }

    #[rstest]
    #[tokio::test]
    async fn directory_errors_are_treated_as_failure() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_login()
            .return_once(|_| Err(UserDirectoryError::unavailable("offline")));

        let result = Authenticator::new(Arc::new(directory))
            .authenticate(&credentials("admin", "password"))
            .await;
        assert!(result.is_none());
    }
}
