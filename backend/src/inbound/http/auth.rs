//! Header-based authentication for HTTP handlers.
//!
//! Clients send their login and password in two request headers whose names
//! are configured once at startup (`user` and `password` by default). This
//! module turns those headers into [`Credentials`] and runs them through the
//! domain [`Authenticator`](crate::domain::Authenticator).

use actix_web::HttpRequest;
use actix_web::http::header::{HeaderName, InvalidHeaderName};
use tracing::debug;

use crate::domain::{Credentials, Error, NetworkUser};

use super::ApiResult;
use super::state::HttpState;

/// Default header carrying the login name.
pub const DEFAULT_USER_HEADER: &str = "user";
/// Default header carrying the password.
pub const DEFAULT_PASSWORD_HEADER: &str = "password";

/// Names of the two credential headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialHeaders {
    user: HeaderName,
    password: HeaderName,
}

impl CredentialHeaders {
    /// Parse header names. Names are matched case-insensitively, as HTTP
    /// requires.
    pub fn new(user: &str, password: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            user: HeaderName::try_from(user)?,
            password: HeaderName::try_from(password)?,
        })
    }

    /// Header carrying the login name.
    pub fn user(&self) -> &HeaderName {
        &self.user
    }

    /// Header carrying the password.
    pub fn password(&self) -> &HeaderName {
        &self.password
    }
}

impl Default for CredentialHeaders {
    fn default() -> Self {
        Self {
            user: HeaderName::from_static(DEFAULT_USER_HEADER),
            password: HeaderName::from_static(DEFAULT_PASSWORD_HEADER),
        }
    }
}

/// Read credentials from `req`; `None` when either header is absent, not
/// visible ASCII, or blank.
pub fn credentials_from_request(req: &HttpRequest, headers: &CredentialHeaders) -> Option<Credentials> {
    let read = |name: &HeaderName| req.headers().get(name).and_then(|value| value.to_str().ok());
    let username = read(headers.user())?;
    let password = read(headers.password())?;
    Credentials::try_from_parts(username, password)
        .inspect_err(|err| debug!(error = %err, "rejecting blank credential header"))
        .ok()
}

/// Authenticate the request or fail with `401 Unauthorized`.
///
/// The same error is returned whatever the reason, so clients cannot tell a
/// missing login from a wrong password or a missing capability.
pub async fn authenticate_request(req: &HttpRequest, state: &HttpState) -> ApiResult<NetworkUser> {
    let Some(credentials) = credentials_from_request(req, &state.credential_headers) else {
        return Err(unauthorized());
    };
    state
        .authenticator
        .authenticate(&credentials)
        .await
        .ok_or_else(unauthorized)
}

fn unauthorized() -> Error {
    Error::unauthorized("Invalid credentials or insufficient permissions")
}
