//! Handler tests for `POST /api/v1/sites`.

use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use actix_web::{App, test};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::MockSiteProvisioner;
use crate::domain::{AddressingMode, Authenticator, NetworkConfig, SiteRecord};
use crate::inbound::http::error::ErrorEnvelope;
use crate::outbound::{InMemorySiteProvisioner, InMemoryUserDirectory};

fn state_for(mode: AddressingMode) -> HttpState {
    HttpState::new(
        Authenticator::new(Arc::new(InMemoryUserDirectory::fixture().expect("fixture accounts"))),
        Arc::new(InMemorySiteProvisioner::default()),
        NetworkConfig::with_default_root(mode),
    )
}

fn valid_body() -> Value {
    json!({
        "site_name": "potato",
        "title": "Potato Farm",
        "email": "farmer@example.com",
    })
}

fn admin_post(body: impl Into<actix_web::web::Bytes>) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/sites")
        .insert_header(("user", "admin"))
        .insert_header(("password", "password"))
        .insert_header(("content-type", "application/json"))
        .set_payload(body)
}

async fn send(state: HttpState, req: test::TestRequest) -> (StatusCode, actix_web::web::Bytes) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    (status, test::read_body(res).await)
}

fn envelope(body: &[u8]) -> ErrorEnvelope {
    serde_json::from_slice(body).expect("error envelope")
}

#[rstest]
#[actix_web::test]
async fn creates_subdomain_site() {
    let (status, body) = send(
        state_for(AddressingMode::Subdomain),
        admin_post(valid_body().to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let site: SiteResponse = serde_json::from_slice(&body).expect("site JSON");
    assert_eq!(site.domain, "potato.example.com");
    assert_eq!(site.path, "/");
    assert_eq!(site.title, "Potato Farm");
    assert_eq!(site.url, "http://potato.example.com/");
}

#[rstest]
#[actix_web::test]
async fn creates_subdirectory_site_under_current_site() {
    let current = SiteRecord::new("example.com", "/network/").expect("valid record");
    let state = state_for(AddressingMode::Subdirectory).with_current_site(Some(current));
    let (status, body) = send(state, admin_post(valid_body().to_string())).await;
    assert_eq!(status, StatusCode::CREATED);
    let site: SiteResponse = serde_json::from_slice(&body).expect("site JSON");
    assert_eq!(site.domain, "example.com");
    assert_eq!(site.path, "/network/potato/");
    assert_eq!(site.url, "http://example.com/network/potato/");
}

#[rstest]
#[case::unknown_user("nobody", "password")]
#[case::wrong_password("admin", "letmein")]
#[case::missing_capability("user", "password")]
#[case::padded_login("  admin  ", "password")]
#[actix_web::test]
async fn rejects_unauthorised_callers(#[case] user: &str, #[case] password: &str) {
    let req = test::TestRequest::post()
        .uri("/api/v1/sites")
        .insert_header(("user", user))
        .insert_header(("password", password))
        .set_payload(valid_body().to_string());
    let (status, body) = send(state_for(AddressingMode::Subdomain), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(envelope(&body).id, "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn authentication_runs_before_body_parsing() {
    let req = test::TestRequest::post()
        .uri("/api/v1/sites")
        .set_payload("{not json");
    let (status, body) = send(state_for(AddressingMode::Subdomain), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(envelope(&body).id, "unauthorized");
}

#[rstest]
#[case::bad_sitename(json!({"site_name": "po tato", "title": "Potato Farm", "email": "farmer@example.com"}), "invalid_sitename")]
#[case::empty_sitename(json!({"site_name": "", "title": "Potato Farm", "email": "farmer@example.com"}), "invalid_sitename")]
#[case::bad_title(json!({"site_name": "potato", "title": " Potato", "email": "farmer@example.com"}), "invalid_site_title")]
#[case::bad_email(json!({"site_name": "potato", "title": "Potato Farm", "email": "farmer@"}), "invalid_email")]
#[case::missing_email(json!({"site_name": "potato", "title": "Potato Farm"}), "missing_field")]
#[case::missing_name(json!({"title": "Potato Farm", "email": "farmer@example.com"}), "missing_field")]
#[case::sitename_checked_first(json!({"site_name": "bad!", "title": "!", "email": "nope"}), "invalid_sitename")]
#[actix_web::test]
async fn rejects_invalid_payloads(#[case] body: Value, #[case] id: &str) {
    let (status, body) = send(
        state_for(AddressingMode::Subdomain),
        admin_post(body.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope(&body).id, id);
}

#[rstest]
#[actix_web::test]
async fn rejects_malformed_json() {
    let (status, body) = send(state_for(AddressingMode::Subdomain), admin_post("{\"site_name\":")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope(&body).id, "invalid_json");
}

#[rstest]
#[actix_web::test]
async fn oversized_body_from_anonymous_caller_is_unauthorised() {
    let req = test::TestRequest::post()
        .uri("/api/v1/sites")
        .set_payload(vec![b'x'; 300 * 1024]);
    let (status, body) = send(state_for(AddressingMode::Subdomain), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(envelope(&body).id, "unauthorized");
}

#[rstest]
#[case::far_over(300 * 1024)]
#[case::one_over(MAX_BODY_BYTES + 1)]
#[actix_web::test]
async fn oversized_body_gets_payload_too_large_envelope(#[case] size: usize) {
    let (status, body) = send(
        state_for(AddressingMode::Subdomain),
        admin_post(vec![b' '; size]),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let envelope = envelope(&body);
    assert_eq!(envelope.id, "payload_too_large");
    assert_eq!(envelope.url, crate::inbound::http::error::ERROR_DOCUMENTATION_URL);
}

#[rstest]
#[actix_web::test]
async fn body_at_the_limit_is_parsed() {
    let mut body = valid_body().to_string().into_bytes();
    body.resize(MAX_BODY_BYTES, b' ');
    let (status, _) = send(state_for(AddressingMode::Subdomain), admin_post(body)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[rstest]
#[case::same_case("potato")]
#[case::upper_case_host("POTATO")]
#[actix_web::test]
async fn duplicate_address_is_a_conflict(#[case] second_name: &str) {
    let state = state_for(AddressingMode::Subdomain);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;

    let first = test::call_service(&app, admin_post(valid_body().to_string()).to_request()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let mut repeat = valid_body();
    repeat["site_name"] = json!(second_name);
    let second = test::call_service(&app, admin_post(repeat.to_string()).to_request()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = test::read_body(second).await;
    assert_eq!(envelope(&body).id, "site_exists");
}

#[rstest]
#[actix_web::test]
async fn backend_failures_are_redacted() {
    let mut provisioner = MockSiteProvisioner::new();
    provisioner
        .expect_create_site()
        .times(1)
        .return_once(|_, _| Err(SiteProvisionerError::backend("disk on fire")));
    let state = HttpState::new(
        Authenticator::new(Arc::new(InMemoryUserDirectory::fixture().expect("fixture accounts"))),
        Arc::new(provisioner),
        NetworkConfig::default(),
    );

    let (status, body) = send(state, admin_post(valid_body().to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let envelope = envelope(&body);
    assert_eq!(envelope.id, "internal_error");
    assert_eq!(envelope.message, "Internal server error");
}

#[rstest]
#[case(Method::GET)]
#[case(Method::PUT)]
#[case(Method::DELETE)]
#[actix_web::test]
async fn other_methods_are_not_allowed(#[case] method: Method) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_for(AddressingMode::Subdomain)))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;
    let req = test::TestRequest::default()
        .method(method)
        .uri("/api/v1/sites")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        res.headers()
            .get(header::ALLOW)
            .and_then(|value| value.to_str().ok()),
        Some("POST")
    );
    let body = test::read_body(res).await;
    assert_eq!(envelope(&body).id, "method_not_allowed");
}
