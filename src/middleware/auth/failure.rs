//! Identification-error response for rejected credentials.
//!
//! Every authentication failure gets the same body regardless of cause; the
//! cause is only logged.

use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AuthFailure;

pub const IDENTIFICATION_ERROR_CODE: &str = "IDENTIFICATION_ERROR";
pub const IDENTIFICATION_ERROR_MSG: &str = "identification error";
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FailureEnvelope {
    pub code: &'static str,
    pub msg: &'static str,
}

impl FailureEnvelope {
    pub const IDENTIFICATION_ERROR: Self = Self {
        code: IDENTIFICATION_ERROR_CODE,
        msg: IDENTIFICATION_ERROR_MSG,
    };
}

/// 401 with the identification-error envelope.
///
/// If the envelope can't be serialized the error is logged and the 401 goes out
/// with an empty body; the denial stands either way.
pub fn identification_error() -> Response {
    let body = match serde_json::to_vec(&FailureEnvelope::IDENTIFICATION_ERROR) {
        Ok(bytes) => Body::from(bytes),
        Err(err) => {
            tracing::error!(error = %err, "failed to write identification error body");
            Body::empty()
        }
    };

    (
        StatusCode::UNAUTHORIZED,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
        body,
    )
        .into_response()
}

impl IntoResponse for AuthFailure {
    fn into_response(self) -> Response {
        identification_error()
    }
}
