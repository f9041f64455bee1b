//! Domain ports defining the edges of the hexagon.
//!
//! The service never talks to the network's user store or site registry
//! directly. Adapters implement these traits and report failures through the
//! strongly typed error enums declared next to each port.

mod site_provisioner;
mod user_directory;

#[cfg(test)]
pub use site_provisioner::MockSiteProvisioner;
pub use site_provisioner::{SiteProvisioner, SiteProvisionerError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
