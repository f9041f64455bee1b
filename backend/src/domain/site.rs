//! Site records and validated site creation input.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{is_valid_email, is_valid_site_title, is_valid_sitename};

/// Validation errors returned by the site model constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteValidationError {
    /// Site name is empty or contains characters outside `[A-Za-z0-9-]`.
    #[error("site name may only contain letters, numbers, and hyphens")]
    InvalidSitename,
    /// Site title is empty, starts with a symbol, or contains symbols.
    #[error("site title must start with a letter or number and contain only letters, numbers, spaces, or hyphens")]
    InvalidSiteTitle,
    /// Email address does not match `local@domain.tld`.
    #[error("email address is not valid")]
    InvalidEmail,
}

/// Errors returned when a configured site record is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteRecordError {
    /// Domain was blank.
    #[error("site domain must not be empty")]
    EmptyDomain,
    /// Domain contained a path separator or whitespace.
    #[error("site domain must be a bare host name")]
    InvalidDomain,
    /// Path did not start and end with `/`.
    #[error("site path must start and end with '/'")]
    InvalidPath,
}

macro_rules! validated_string {
    ($(#[$meta:meta])* $name:ident, $check:path, $error:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap the given value.
            pub fn new(value: impl Into<String>) -> Result<Self, SiteValidationError> {
                let value = value.into();
                if $check(&value) {
                    Ok(Self(value))
                } else {
                    Err($error)
                }
            }

            /// Borrow the validated value.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = SiteValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

validated_string!(
    /// Candidate site name, used as a subdomain label or path segment.
    ///
    /// # Examples
    /// ```
    /// use multisite_json_api::domain::SiteName;
    ///
    /// assert!(SiteName::new("test-site").is_ok());
    /// assert!(SiteName::new("No spaces").is_err());
    /// ```
    SiteName,
    is_valid_sitename,
    SiteValidationError::InvalidSitename
);

validated_string!(
    /// Human-readable title of a new site.
    SiteTitle,
    is_valid_site_title,
    SiteValidationError::InvalidSiteTitle
);

validated_string!(
    /// Email address of the new site's administrator.
    EmailAddress,
    is_valid_email,
    SiteValidationError::InvalidEmail
);

/// An existing site of the network: a host name plus a URL path.
///
/// ## Invariants
/// - `domain` is non-empty and contains no `/` or whitespace.
/// - `path` starts and ends with `/`.
///
/// # Examples
/// ```
/// use multisite_json_api::domain::SiteRecord;
///
/// let site = SiteRecord::new("www.example.com", "/sub/").unwrap();
/// assert_eq!(site.domain(), "www.example.com");
/// assert_eq!(site.path(), "/sub/");
/// assert!(SiteRecord::new("example.com", "sub").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    pub(super) domain: String,
    pub(super) path: String,
}

impl SiteRecord {
    /// Validate and construct a site record.
    pub fn new(
        domain: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self, SiteRecordError> {
        let domain = domain.into();
        let path = path.into();
        if domain.trim().is_empty() {
            return Err(SiteRecordError::EmptyDomain);
        }
        if domain.contains(|c: char| c == '/' || c.is_whitespace()) {
            return Err(SiteRecordError::InvalidDomain);
        }
        if !(path.starts_with('/') && path.ends_with('/')) {
            return Err(SiteRecordError::InvalidPath);
        }
        Ok(Self { domain, path })
    }

    /// Site record served from the root path `/`.
    pub fn at_root(domain: impl Into<String>) -> Result<Self, SiteRecordError> {
        Self::new(domain, "/")
    }

    /// Host name of the site.
    pub fn domain(&self) -> &str {
        self.domain.as_str()
    }

    /// URL path of the site, always slash-delimited.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }
}

/// Computed location of a site that is about to be created.
///
/// Host names are case-insensitive, so the domain is held in ASCII lowercase
/// and two addresses differing only in host case compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteAddress {
    domain: String,
    path: String,
}

impl SiteAddress {
    pub(crate) fn new(mut domain: String, path: String) -> Self {
        domain.make_ascii_lowercase();
        Self { domain, path }
    }

    /// Full host name of the new site.
    pub fn domain(&self) -> &str {
        self.domain.as_str()
    }

    /// Full URL path of the new site.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Public URL of the site.
    ///
    /// # Examples
    /// ```
    /// use multisite_json_api::domain::{AddressingMode, NetworkConfig, SiteName};
    ///
    /// let network = NetworkConfig::with_default_root(AddressingMode::Subdirectory);
    /// let name = SiteName::new("blog").unwrap();
    /// let address = network.site_address(&name, None);
    /// assert_eq!(address.url(), "http://example.com/blog/");
    /// ```
    pub fn url(&self) -> String {
        format!("http://{}{}", self.domain, self.path)
    }
}

impl fmt::Display for SiteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.domain, self.path)
    }
}

/// Validated request to provision a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSite {
    /// Requested site name.
    pub name: SiteName,
    /// Title shown on the new site.
    pub title: SiteTitle,
    /// Administrator email address.
    pub admin_email: EmailAddress,
    /// Where the site will live.
    pub address: SiteAddress,
}

/// A site created by the provisioner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedSite {
    /// Network-wide numeric site identifier.
    pub id: u64,
    /// Title the site was created with.
    pub title: SiteTitle,
    /// Location of the site.
    pub address: SiteAddress,
}
