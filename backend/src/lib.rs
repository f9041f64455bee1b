//! JSON API for creating sites in a multisite network.
//!
//! - [`domain`]: validation rules, address computation, authentication and
//!   the ports the endpoint depends on.
//! - [`inbound::http`]: the actix-web adapter and error responder.
//! - [`outbound`]: in-memory port adapters.
//! - [`settings`]: layered runtime configuration.
//! - [`server`]: application and server assembly.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
