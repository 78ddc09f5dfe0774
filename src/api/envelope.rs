//! JSON envelope for the `/api/v1` surface.
//!
//! Success: `{ "data": T, "meta": { "timestamp", "version" } }`
//! Failure: `{ "error": { "code", "message" }, "meta": { ... } }`
//!
//! Handlers return [`ApiError`] as their error type; domain validation
//! failures and body rejections convert into it with `?`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::prediction::ValidationError;

/// Envelope schema version.
pub const ENVELOPE_VERSION: &str = "1";

#[derive(Debug, Serialize)]
pub struct Meta {
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
}

impl Meta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now(),
            version: ENVELOPE_VERSION,
        }
    }
}

#[derive(Debug, Serialize)]
struct DataBody<T> {
    data: T,
    meta: Meta,
}

/// Wrap a payload in a 200 `{data, meta}` envelope.
pub fn data<T: Serialize>(payload: T) -> Response {
    Json(DataBody {
        data: payload,
        meta: Meta::now(),
    })
    .into_response()
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: ErrorFields<'a>,
    meta: Meta,
}

#[derive(Debug, Serialize)]
struct ErrorFields<'a> {
    code: &'a str,
    message: &'a str,
}

/// A failed API call: HTTP status plus a stable machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Out-of-range reservoir parameters: 422 with the rule's own code.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.code(), err.to_string())
    }
}

/// Unreadable request body (bad JSON, missing field, wrong content type).
/// Keeps axum's status so clients can tell 400/415/422 apart.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), "INVALID_BODY", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorFields {
                code: self.code,
                message: &self.message,
            },
            meta: Meta::now(),
        };
        (self.status, Json(body)).into_response()
    }
}
