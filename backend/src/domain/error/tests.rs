//! Tests for domain error construction and trace propagation.

use super::*;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
fn invalid_request_constructor_sets_code(base_error: Error) {
    assert_eq!(base_error.code(), ErrorCode::InvalidRequest);
    assert_eq!(base_error.message(), "bad");
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[case(ErrorCode::InvalidJson, "invalid_json")]
#[case(ErrorCode::MissingField, "missing_field")]
#[case(ErrorCode::InvalidSiteTitle, "invalid_site_title")]
#[case(ErrorCode::Unauthorized, "unauthorized")]
#[case(ErrorCode::MethodNotAllowed, "method_not_allowed")]
#[case(ErrorCode::NotFound, "not_found")]
#[case(ErrorCode::PayloadTooLarge, "payload_too_large")]
#[case(ErrorCode::SiteExists, "site_exists")]
fn wire_names_match_serde_representation(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(code.as_str(), expected);
    let serialised = serde_json::to_value(code).expect("serialise error code");
    assert_eq!(serialised, serde_json::Value::String(expected.to_owned()));
}
