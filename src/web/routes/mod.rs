use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::services::error::WorkflowError;

pub mod activities;
pub mod auth;
pub mod diplomas;
pub mod enrollments;
pub mod guests;

/// Stable JSON error shape: a machine-readable kind plus a human message.
/// Dependency failures are logged here and reported as a generic internal
/// error, never with their underlying detail.
pub(crate) fn error_response(err: WorkflowError) -> (StatusCode, Json<Value>) {
    let (status, kind) = match &err {
        WorkflowError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
        WorkflowError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
        WorkflowError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        WorkflowError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
        WorkflowError::Disambiguation(_) => (StatusCode::CONFLICT, "disambiguation"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };

    let message = if err.is_user_facing() {
        err.to_string()
    } else {
        tracing::error!(error = %err, "fallo interno");
        "Error interno del servidor".to_string()
    };

    (
        status,
        Json(json!({
            "status": "error",
            "error": kind,
            "message": message,
        })),
    )
}
