//! Error responder for the HTTP adapter.
//!
//! Every rejected request receives the same three-key envelope:
//!
//! ```text
//! {
//!     "id": "invalid_sitename",
//!     "message": "Invalid site name",
//!     "url": "http://github.com/remkade/multisite-json-api/wiki"
//! }
//! ```
//!
//! Keys are emitted in that order with four-space indentation; existing
//! clients compare the body byte for byte.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Documentation link included in every error envelope.
pub const ERROR_DOCUMENTATION_URL: &str = "http://github.com/remkade/multisite-json-api/wiki";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Error body returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ErrorEnvelope {
    /// Stable machine-readable identifier.
    #[schema(example = "invalid_sitename")]
    pub id: String,
    /// Human-readable description.
    #[schema(example = "Invalid site name")]
    pub message: String,
    /// Link to the API documentation.
    #[schema(example = "http://github.com/remkade/multisite-json-api/wiki")]
    pub url: String,
}

impl ErrorEnvelope {
    /// Build an envelope pointing at [`ERROR_DOCUMENTATION_URL`].
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            url: ERROR_DOCUMENTATION_URL.to_owned(),
        }
    }

    /// Serialise with four-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buffer).map_err(|err| serde::ser::Error::custom(err.to_string()))
    }
}

/// Emit an error response with the given status and envelope.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use multisite_json_api::inbound::http::error::error;
///
/// let response = error("Error!", "error_id", StatusCode::BAD_REQUEST);
/// assert_eq!(response.status(), StatusCode::BAD_REQUEST);
/// ```
pub fn error(message: &str, id: &str, status: StatusCode) -> HttpResponse {
    let envelope = ErrorEnvelope::new(id, message);
    match envelope.to_pretty_json() {
        Ok(body) => HttpResponse::build(status)
            .content_type(ContentType::json())
            .body(body),
        Err(err) => {
            error!(error = %err, id, "failed to serialise error envelope");
            HttpResponse::build(status)
                .content_type(ContentType::json())
                .finish()
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest
        | ErrorCode::InvalidJson
        | ErrorCode::MissingField
        | ErrorCode::InvalidSitename
        | ErrorCode::InvalidSiteTitle
        | ErrorCode::InvalidEmail => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::SiteExists => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_message(err: &Error) -> &str {
    if matches!(err.code(), ErrorCode::InternalError) {
        "Internal server error"
    } else {
        err.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = error(public_message(self), self.code().as_str(), self.status_code());
        if let Some(id) = self.trace_id() {
            match header::HeaderValue::from_str(id) {
                Ok(value) => {
                    response
                        .headers_mut()
                        .insert(header::HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(err) => error!(error = %err, "trace identifier is not a valid header"),
            }
        }
        response
    }
}
