//! Site creation endpoint.
//!
//! ```text
//! POST /api/v1/sites
//! user: admin
//! password: password
//!
//! {"site_name":"potato","title":"Potato Farm","email":"farmer@example.com"}
//! ```
//!
//! Credentials are checked before the body is read, so anonymous callers
//! learn nothing about the payload rules or size limit.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::domain::ports::SiteProvisionerError;
use crate::domain::{
    EmailAddress, Error, ErrorCode, NewSite, ProvisionedSite, SiteName, SiteTitle,
    SiteValidationError,
};

/// Largest request body accepted by [`create_site`], in bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

use super::ApiResult;
use super::auth::authenticate_request;
use super::error::ErrorEnvelope;
use super::state::HttpState;

/// Request body for `POST /api/v1/sites`.
///
/// Fields are optional at the serde level so a missing field is reported as
/// `missing_field` rather than a generic parse failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateSiteRequest {
    /// Site name; becomes a subdomain label or path segment.
    #[schema(example = "potato")]
    pub site_name: Option<String>,
    /// Title of the new site.
    #[schema(example = "Potato Farm")]
    pub title: Option<String>,
    /// Administrator email address.
    #[schema(example = "farmer@example.com")]
    pub email: Option<String>,
}

/// Response body describing the created site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SiteResponse {
    /// Network-wide site identifier.
    #[schema(example = 2)]
    pub id: u64,
    /// Host name of the site.
    #[schema(example = "potato.example.com")]
    pub domain: String,
    /// URL path of the site.
    #[schema(example = "/")]
    pub path: String,
    /// Site title.
    #[schema(example = "Potato Farm")]
    pub title: String,
    /// Public URL of the site.
    #[schema(example = "http://potato.example.com/")]
    pub url: String,
}

impl From<ProvisionedSite> for SiteResponse {
    fn from(site: ProvisionedSite) -> Self {
        Self {
            id: site.id,
            url: site.address.url(),
            domain: site.address.domain().to_owned(),
            path: site.address.path().to_owned(),
            title: site.title.into(),
        }
    }
}

/// Register the sites resource on a service config.
///
/// Any method other than `POST` is answered with `405 Method Not Allowed`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use multisite_json_api::inbound::http::sites;
///
/// let app = App::new().service(web::scope("/api/v1").configure(sites::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/sites")
            .route(web::post().to(create_site))
            .default_service(web::to(method_not_allowed)),
    );
}

/// Create a site in the network.
#[utoipa::path(
    post,
    path = "/api/v1/sites",
    request_body = CreateSiteRequest,
    responses(
        (status = 201, description = "Site created", body = SiteResponse),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials or insufficient permissions", body = ErrorEnvelope),
        (status = 405, description = "Method not allowed", body = ErrorEnvelope),
        (status = 409, description = "A site already exists at this address", body = ErrorEnvelope),
        (status = 413, description = "Request body too large", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["sites"],
    operation_id = "createSite",
    security(("UserHeader" = [], "PasswordHeader" = []))
)]
pub async fn create_site(
    req: HttpRequest,
    state: web::Data<HttpState>,
    body: web::Payload,
) -> ApiResult<HttpResponse> {
    let user = authenticate_request(&req, &state).await?;
    let bytes = read_body(body).await?;
    let payload: CreateSiteRequest = serde_json::from_slice(&bytes)
        .map_err(|err| Error::new(ErrorCode::InvalidJson, format!("Invalid JSON body: {err}")))?;

    let name = SiteName::new(required(payload.site_name, "site_name")?)
        .map_err(map_validation_error)?;
    let title =
        SiteTitle::new(required(payload.title, "title")?).map_err(map_validation_error)?;
    let admin_email =
        EmailAddress::new(required(payload.email, "email")?).map_err(map_validation_error)?;

    let address = state
        .network
        .site_address(&name, state.current_site.as_ref());
    let site = NewSite {
        name,
        title,
        admin_email,
        address,
    };

    let created = state
        .provisioner
        .create_site(site, &user)
        .await
        .map_err(map_provisioner_error)?;
    info!(
        site_id = created.id,
        domain = created.address.domain(),
        path = created.address.path(),
        requested_by = user.id,
        "site created"
    );
    Ok(HttpResponse::Created().json(SiteResponse::from(created)))
}

/// Fallback for unsupported methods on the sites resource.
pub async fn method_not_allowed() -> HttpResponse {
    let mut response =
        Error::method_not_allowed("Only POST is supported on this resource").error_response();
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("POST"));
    response
}

async fn read_body(mut payload: web::Payload) -> ApiResult<web::BytesMut> {
    let mut body = web::BytesMut::new();
    while let Some(next) = payload.next().await {
        let chunk = next
            .map_err(|err| Error::invalid_request(format!("Could not read request body: {err}")))?;
        if body.len().saturating_add(chunk.len()) > MAX_BODY_BYTES {
            return Err(Error::payload_too_large(format!(
                "Request body exceeds {MAX_BODY_BYTES} bytes"
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn required(value: Option<String>, field: &str) -> ApiResult<String> {
    value.ok_or_else(|| {
        Error::new(
            ErrorCode::MissingField,
            format!("missing required field: {field}"),
        )
    })
}

fn map_validation_error(err: SiteValidationError) -> Error {
    let code = match err {
        SiteValidationError::InvalidSitename => ErrorCode::InvalidSitename,
        SiteValidationError::InvalidSiteTitle => ErrorCode::InvalidSiteTitle,
        SiteValidationError::InvalidEmail => ErrorCode::InvalidEmail,
    };
    Error::new(code, err.to_string())
}

fn map_provisioner_error(err: SiteProvisionerError) -> Error {
    match err {
        SiteProvisionerError::AlreadyExists { .. } => Error::site_exists(err.to_string()),
        SiteProvisionerError::Backend { .. } => {
            error!(error = %err, "site provisioning failed");
            Error::internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests;
