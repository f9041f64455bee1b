//! HTTP inbound adapter exposing the site creation API.

pub mod auth;
pub mod error;
pub mod health;
pub mod sites;
pub mod state;

pub use error::ApiResult;

use actix_web::{HttpRequest, HttpResponse, web};

use crate::domain::Error;

/// Mount every API route on `cfg`.
///
/// Expects [`state::HttpState`] and [`health::HealthState`] to be registered
/// as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .service(web::scope("/api/v1").configure(sites::configure));
}

/// Fallback for paths no route matches; answers with a `not_found` envelope.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!("No resource at {}", req.path())))
}
