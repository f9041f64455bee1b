//! Network addressing: where a new site lives.
//!
//! A multisite network serves its sites either as subdomains of the root
//! domain (`blog.example.com/`) or as sub-directories of the root path
//! (`example.com/blog/`). [`NetworkConfig`] carries that choice explicitly so
//! the formatter stays a pure function of its inputs.
//!
//! Every operation accepts an optional "current site". When one is given its
//! domain and path are the base for the new site; when it is absent the
//! network root is used instead. A missing current site is never an error.

use super::site::{SiteAddress, SiteName, SiteRecord};

/// Host name used when no network root is configured.
pub const DEFAULT_NETWORK_DOMAIN: &str = "example.com";

/// Path used when no network root is configured.
pub const DEFAULT_NETWORK_PATH: &str = "/";

/// How new sites are addressed within the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressingMode {
    /// Each site gets its own host name below the base domain.
    #[default]
    Subdomain,
    /// Each site gets a path segment below the base path.
    Subdirectory,
}

/// Read-only addressing configuration for the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    mode: AddressingMode,
    root: SiteRecord,
}

impl NetworkConfig {
    /// Build a configuration from an addressing mode and root site.
    pub fn new(mode: AddressingMode, root: SiteRecord) -> Self {
        Self { mode, root }
    }

    /// Configuration rooted at `example.com/`.
    pub fn with_default_root(mode: AddressingMode) -> Self {
        Self {
            mode,
            root: SiteRecord {
                domain: DEFAULT_NETWORK_DOMAIN.to_owned(),
                path: DEFAULT_NETWORK_PATH.to_owned(),
            },
        }
    }

    /// Addressing mode in effect.
    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    /// Root site of the network.
    pub fn root(&self) -> &SiteRecord {
        &self.root
    }

    fn base<'a>(&'a self, current_site: Option<&'a SiteRecord>) -> &'a SiteRecord {
        current_site.unwrap_or(&self.root)
    }

    /// Full host name for a site called `name`.
    ///
    /// # Examples
    /// ```
    /// use multisite_json_api::domain::{AddressingMode, NetworkConfig, SiteRecord};
    ///
    /// let subdomains = NetworkConfig::with_default_root(AddressingMode::Subdomain);
    /// assert_eq!(subdomains.full_domain("potato", None), "potato.example.com");
    ///
    /// let current = SiteRecord::at_root("multisite.com").unwrap();
    /// assert_eq!(subdomains.full_domain("api", Some(&current)), "api.multisite.com");
    ///
    /// let directories = NetworkConfig::with_default_root(AddressingMode::Subdirectory);
    /// assert_eq!(directories.full_domain("potato", None), "example.com");
    /// ```
    pub fn full_domain(&self, name: &str, current_site: Option<&SiteRecord>) -> String {
        let base = self.base(current_site).domain();
        match self.mode {
            AddressingMode::Subdomain => format!("{name}.{base}"),
            AddressingMode::Subdirectory => base.to_owned(),
        }
    }

    /// Full URL path for a site called `name`. The result always starts and
    /// ends with `/`.
    ///
    /// # Examples
    /// ```
    /// use multisite_json_api::domain::{AddressingMode, NetworkConfig, SiteRecord};
    ///
    /// let directories = NetworkConfig::with_default_root(AddressingMode::Subdirectory);
    /// let current = SiteRecord::new("www.example.com", "/sub/").unwrap();
    /// assert_eq!(directories.full_path("test-site", Some(&current)), "/sub/test-site/");
    ///
    /// let subdomains = NetworkConfig::with_default_root(AddressingMode::Subdomain);
    /// assert_eq!(subdomains.full_path("potato", None), "/");
    /// ```
    pub fn full_path(&self, name: &str, current_site: Option<&SiteRecord>) -> String {
        let base = self.base(current_site).path();
        match self.mode {
            AddressingMode::Subdomain => base.to_owned(),
            AddressingMode::Subdirectory => format!("{base}{name}/"),
        }
    }

    /// Combined domain and path for a validated site name.
    pub fn site_address(&self, name: &SiteName, current_site: Option<&SiteRecord>) -> SiteAddress {
        SiteAddress::new(
            self.full_domain(name.as_str(), current_site),
            self.full_path(name.as_str(), current_site),
        )
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::with_default_root(AddressingMode::default())
    }
}
