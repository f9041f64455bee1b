//! Outbound adapters implementing the domain ports.
//!
//! Both adapters keep their state in process memory; the host platform's
//! own storage is out of scope.

pub mod site_provisioner;
pub mod user_directory;

pub use site_provisioner::InMemorySiteProvisioner;
pub use user_directory::{InMemoryUserDirectory, UserRecord, hash_password};
