use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use itemstore_core::{DomainError, ValidationError};

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(e) => validation_error_to_response(e),
        e @ DomainError::NotFound { .. } => json_error(StatusCode::NOT_FOUND, "not_found", e.to_string()),
    }
}

/// 400 naming the field and the rule it broke.
pub fn validation_error_to_response(err: ValidationError) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": err.to_string(),
            "field": err.field,
            "constraint": err.constraint.code(),
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
