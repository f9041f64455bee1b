//! Startup from a users file and custom credential headers.
//!
//! Settings are built directly rather than through the environment, so these
//! tests do not need to lock process state.

use std::io::Write;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use multisite_json_api::inbound::http::health::HealthState;
use multisite_json_api::outbound::hash_password;
use multisite_json_api::server::{ServerConfig, build_app};
use multisite_json_api::settings::{ApiSettings, SettingsError};
use rstest::rstest;
use serde_json::json;
use tempfile::NamedTempFile;

fn users_file() -> NamedTempFile {
    let records = json!([
        {
            "id": 10,
            "login": "ops",
            "display_name": "Operations",
            "password_hash": hash_password("correct horse").expect("hash"),
            "capabilities": ["manage_sites"]
        },
        {
            "id": 11,
            "login": "viewer",
            "display_name": "Viewer",
            "password_hash": hash_password("correct horse").expect("hash")
        }
    ]);
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(records.to_string().as_bytes())
        .expect("write users file");
    file
}

#[rstest]
#[case::manager("ops", StatusCode::CREATED)]
#[case::without_capability("viewer", StatusCode::UNAUTHORIZED)]
#[case::fixture_account_absent("admin", StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn accounts_come_from_the_users_file(#[case] login: &str, #[case] expected: StatusCode) {
    let file = users_file();
    let settings = ApiSettings {
        users_file: Some(file.path().to_path_buf()),
        user_header: Some("X-Api-User".into()),
        password_header: Some("X-Api-Password".into()),
        subdirectory_install: true,
        ..ApiSettings::default()
    };
    let config = ServerConfig::from_settings(&settings).expect("server config");
    let app = actix_test::init_service(build_app(
        web::Data::new(HealthState::new()),
        web::Data::new(config.http_state().clone()),
    ))
    .await;

    let password = if login == "admin" { "password" } else { "correct horse" };
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/sites")
        .insert_header(("X-Api-User", login))
        .insert_header(("X-Api-Password", password))
        .set_json(json!({"site_name": "ops-blog", "title": "Ops Blog", "email": "ops@example.com"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), expected);
}

#[rstest]
#[case::missing_fields(r#"[{"login": "ops"}]"#)]
#[case::unsalted_digest(concat!(
    r#"[{"id": 1, "login": "ops", "display_name": "Ops", "#,
    r#""password_hash": "4104d36f8da2c254349f85836793ebe029e0c957063a34c91c2e9203187b5631"}]"#
))]
#[case::legacy_field(concat!(
    r#"[{"id": 1, "login": "ops", "display_name": "Ops", "#,
    r#""password_sha256": "4104d36f8da2c254349f85836793ebe029e0c957063a34c91c2e9203187b5631"}]"#
))]
fn malformed_users_file_stops_startup(#[case] contents: &str) {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write users file");
    let settings = ApiSettings {
        users_file: Some(file.path().to_path_buf()),
        ..ApiSettings::default()
    };
    assert!(matches!(
        ServerConfig::from_settings(&settings),
        Err(SettingsError::Users(_))
    ));
}
