//! OpenAPI documentation for the site creation API.
//!
//! Swagger UI serves this document in debug builds; `openapi-dump` prints it
//! for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::{DEFAULT_PASSWORD_HEADER, DEFAULT_USER_HEADER};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::sites::{CreateSiteRequest, SiteResponse};

/// Registers the two credential headers as API key schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "UserHeader",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                DEFAULT_USER_HEADER,
                "Login name of a network administrator.",
            ))),
        );
        components.add_security_scheme(
            "PasswordHeader",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                DEFAULT_PASSWORD_HEADER,
                "Password for the login in the user header.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Multisite JSON API",
        description = "Create sites in a multisite network over JSON."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::sites::create_site,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CreateSiteRequest, SiteResponse, ErrorEnvelope)),
    tags(
        (name = "sites", description = "Site provisioning"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(doc: &utoipa::openapi::OpenApi, name: &str) -> Vec<String> {
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/api/v1/sites", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[rstest]
    #[case("ErrorEnvelope", &["id", "message", "url"])]
    #[case("SiteResponse", &["domain", "id", "path", "title", "url"])]
    #[case("CreateSiteRequest", &["email", "site_name", "title"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] expected: &[&str]) {
        let mut fields = object_fields(&ApiDoc::openapi(), name);
        fields.sort();
        assert_eq!(fields, expected);
    }

    #[rstest]
    fn registers_credential_header_schemes() {
        let doc = ApiDoc::openapi();
        let schemes = &doc
            .components
            .as_ref()
            .expect("components")
            .security_schemes;
        assert!(schemes.contains_key("UserHeader"));
        assert!(schemes.contains_key("PasswordHeader"));
    }
}
