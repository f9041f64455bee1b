//! Domain primitives, services, and ports.
//!
//! Purpose: hold the transport-agnostic core of the service. Nothing here
//! depends on actix; adapters translate to and from these types.
//!
//! Public surface:
//! - Validators (`is_valid_sitename`, `is_valid_email`, `is_valid_site_title`)
//!   and the validated newtypes built on them.
//! - `NetworkConfig`: full domain and path computation for new sites.
//! - `Authenticator`: credential and capability checks over a
//!   `UserDirectory` port.
//! - `Error` / `ErrorCode`: failures adapters render to clients.

pub mod auth;
pub mod authenticator;
pub mod error;
pub mod network;
pub mod ports;
pub mod site;
pub mod trace_id;
pub mod validation;

pub use self::auth::{Capability, Credentials, CredentialsValidationError, NetworkUser};
pub use self::authenticator::Authenticator;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::network::{
    AddressingMode, DEFAULT_NETWORK_DOMAIN, DEFAULT_NETWORK_PATH, NetworkConfig,
};
pub use self::site::{
    EmailAddress, NewSite, ProvisionedSite, SiteAddress, SiteName, SiteRecord, SiteRecordError,
    SiteTitle, SiteValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{is_valid_email, is_valid_site_title, is_valid_sitename};
