//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error_case() -> Error {
    Error::internal("Error al crear estudiante")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "sql": "insert into estudiantes" }))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("No autorizado"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Estudiante no encontrado"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("El código A1 ya está registrado"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let value = serde_json::from_slice(&bytes).expect("error JSON");
    (status, header, value)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_drop_details_but_keep_trace_id(internal_error_case: Error) {
    let (status, header, body) = body_of(&internal_error_case).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body["error"], "Error al crear estudiante");
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["traceId"], TRACE_ID);
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_details_and_omit_missing_trace_header() {
    let error = Error::invalid_request("Sellos debe ser un número entre 0 y 7")
        .with_details(json!({ "field": "sellos" }));
    let (status, header, body) = body_of(&error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(header.is_none());
    assert_eq!(body["error"], "Sellos debe ser un número entre 0 y 7");
    assert_eq!(body["details"]["field"], "sellos");
}

#[rstest]
fn actix_errors_are_promoted_to_generic_internal_errors() {
    let promoted = Error::from(actix_web::error::ErrorBadGateway("upstream detail"));
    assert_eq!(promoted.code(), ErrorCode::InternalError);
    assert_eq!(promoted.message(), "Error interno del servidor");
}
