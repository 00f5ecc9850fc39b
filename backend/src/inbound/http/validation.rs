//! Shared validation helpers for inbound HTTP adapters.

use actix_web::{HttpRequest, error::JsonPayloadError};
use serde_json::{Value, json};

use crate::domain::{
    Error, NewParticipant, ParticipantValidationError, StampCount, validate_new_participant,
    validate_stamp_count,
};

const MALFORMED_BODY_MESSAGE: &str = "Cuerpo de la solicitud inválido";

/// Map a domain validation failure to an `invalid_request` error.
pub(crate) fn map_validation_error(err: ParticipantValidationError) -> Error {
    let details = match &err {
        ParticipantValidationError::MissingFields { fields } => {
            json!({ "fields": fields, "code": "missing_field" })
        }
        ParticipantValidationError::StampsOutOfRange => {
            json!({ "field": "sellos", "code": "out_of_range" })
        }
        ParticipantValidationError::SearchTermTooShort => {
            json!({ "field": "q", "code": "too_short" })
        }
    };
    Error::invalid_request(err.to_string()).with_details(details)
}

/// Validate create-participant fields that may be absent from the body.
pub(crate) fn parse_new_participant(
    nombre: Option<&str>,
    apellido: Option<&str>,
    codigo: Option<&str>,
) -> Result<NewParticipant, Error> {
    validate_new_participant(
        nombre.unwrap_or_default(),
        apellido.unwrap_or_default(),
        codigo.unwrap_or_default(),
    )
    .map_err(map_validation_error)
}

/// Accept only a JSON integer in `[0, 7]`.
///
/// Strings, floats, booleans and missing values are rejected with the same
/// message as out-of-range numbers.
pub(crate) fn parse_stamp_count(value: Option<&Value>) -> Result<StampCount, Error> {
    value
        .and_then(Value::as_i64)
        .ok_or(ParticipantValidationError::StampsOutOfRange)
        .and_then(validate_stamp_count)
        .map_err(map_validation_error)
}

/// Turn body deserialisation failures into the standard error envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(MALFORMED_BODY_MESSAGE)
        .with_details(json!({ "reason": err.to_string(), "code": "malformed_body" }))
        .into()
}
