//! Request validation helpers and extractor error handlers.
//!
//! Extractor failures (bad JSON, bad query strings, bad path segments) are
//! turned into the same `invalid_request` payload the domain produces, so
//! clients only ever parse one error shape.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Largest JSON body accepted by listing endpoints.
pub const JSON_BODY_LIMIT: usize = 64 * 1024;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidJson,
    UnsupportedContentType,
    PayloadTooLarge,
    InvalidQuery,
    InvalidPath,
    InvalidUuid,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::UnsupportedContentType => "unsupported_content_type",
            Self::PayloadTooLarge => "payload_too_large",
            Self::InvalidQuery => "invalid_query",
            Self::InvalidPath => "invalid_path",
            Self::InvalidUuid => "invalid_uuid",
        }
    }
}

fn rejected(code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "code": code.as_str() }))
}

/// Parse a UUID path or query value, reporting the offending field.
pub(crate) fn parse_uuid(field: &str, value: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
            "field": field,
            "value": value,
            "code": ValidationCode::InvalidUuid.as_str(),
        }))
    })
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let error = match &err {
        JsonPayloadError::ContentType => rejected(
            ValidationCode::UnsupportedContentType,
            "request body must be application/json",
        ),
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            rejected(
                ValidationCode::PayloadTooLarge,
                format!("request body exceeds {limit} bytes"),
            )
        }
        other => rejected(
            ValidationCode::InvalidJson,
            format!("malformed JSON body: {other}"),
        ),
    };
    error.into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    rejected(
        ValidationCode::InvalidQuery,
        format!("invalid query string: {err}"),
    )
    .into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    rejected(ValidationCode::InvalidPath, format!("invalid path: {err}")).into()
}

/// JSON extractor settings shared by every route.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(json_error)
}

/// Query extractor settings shared by every route.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

/// Path extractor settings shared by every route.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
