//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::json;

async fn error_payload(error: Error, expected_status: StatusCode) -> Value {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("failure envelope is JSON")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("not yours"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("connection string leaked").with_details(json!({"secret": "x"}));

    let payload = error_payload(error, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(payload["success"], json!(false));
    assert_eq!(payload["message"], json!("Internal server error"));
    assert!(payload.get("details").is_none());
}

#[actix_web::test]
async fn validation_errors_carry_message_and_details() {
    let error = Error::invalid_request("nickname must be at least 3 characters")
        .with_details(json!({"field": "nickname", "code": "nickname_too_short"}));

    let payload = error_payload(error, StatusCode::BAD_REQUEST).await;
    assert_eq!(payload["success"], json!(false));
    assert_eq!(
        payload["message"],
        json!("nickname must be at least 3 characters")
    );
    assert_eq!(
        payload["details"],
        json!({"field": "nickname", "code": "nickname_too_short"})
    );
}

#[actix_web::test]
async fn detail_free_errors_omit_the_details_key() {
    let payload = error_payload(Error::not_found("post not found"), StatusCode::NOT_FOUND).await;
    assert_eq!(payload["message"], json!("post not found"));
    assert!(payload.get("details").is_none());
}
