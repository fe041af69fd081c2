//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn store_failure() -> Error {
    Error::internal("failed to write members.json: disk full")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "path": "/var/lib/syndicate-desk/members.json" }))
}

async fn decode(err: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(err);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body = serde_json::from_slice(&bytes).expect("error json");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("member sessions may not access overview"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("member m9 not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("already registered"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_follows_error_code(#[case] err: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(store_failure: Error) {
    let (status, header, body) = decode(&store_failure).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.message(), REDACTED_MESSAGE);
    assert_eq!(body.trace_id(), Some(TRACE_ID));
    assert!(body.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn conflicts_keep_their_details() {
    let err = Error::conflict("training t7 is full").with_details(json!({ "code": "at_capacity" }));

    let (status, header, body) = decode(&err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(header.is_none());
    assert_eq!(body, err);
}

#[rstest]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), REDACTED_MESSAGE);
    assert!(err.details().is_none());
}
