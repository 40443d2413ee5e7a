//! Tests for error construction, trace capture, and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::not_found("missing").try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn trace_id_is_absent_outside_a_request() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn constructors_capture_the_scoped_trace_id(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::forbidden("not yours") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[tokio::test]
async fn decoding_ignores_the_ambient_trace_id(trace_id: TraceId) {
    let payload = json!({"code": "not_found", "message": "missing"});
    let error: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("payload decodes")
    })
    .await;
    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let value = serde_json::to_value(
        Error::invalid_request("bad phone")
            .with_trace_id("abc")
            .with_details(json!({"field": "phone"})),
    )
    .expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad phone",
            "traceId": "abc",
            "details": {"field": "phone"}
        })
    );

    let bare = serde_json::to_value(Error::not_found("gone")).expect("error serialises");
    assert_eq!(bare, json!({"code": "not_found", "message": "gone"}));
}

#[rstest]
#[case(json!({"code": "not_found", "message": "  "}))]
#[case(json!({"code": "not_found", "message": "gone", "traceId": ""}))]
#[case(json!({"code": "not_found", "message": "gone", "extra": 1}))]
fn decoding_rejects_invalid_payloads(#[case] payload: serde_json::Value) {
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
