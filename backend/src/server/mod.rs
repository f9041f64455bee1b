//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;

/// Build the application with every route, the trace middleware, and (in
/// debug builds) Swagger UI at `/docs`. Unmatched paths get a `not_found`
/// envelope.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::web;
/// use multisite_json_api::domain::{Authenticator, NetworkConfig};
/// use multisite_json_api::inbound::http::{health::HealthState, state::HttpState};
/// use multisite_json_api::outbound::{InMemorySiteProvisioner, InMemoryUserDirectory};
/// use multisite_json_api::server::build_app;
///
/// let state = HttpState::new(
///     Authenticator::new(Arc::new(InMemoryUserDirectory::fixture()?)),
///     Arc::new(InMemorySiteProvisioner::default()),
///     NetworkConfig::default(),
/// );
/// let _app = build_app(web::Data::new(HealthState::new()), web::Data::new(state));
/// # Ok::<(), multisite_json_api::domain::ports::UserDirectoryError>(())
/// ```
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(http::configure)
        .default_service(web::to(http::not_found));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        http_state,
    } = config;
    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
