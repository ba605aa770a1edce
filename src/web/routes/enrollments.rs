use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::services::enrollment_service::{self, ScanOutcome};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::routes::error_response;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct EnrollBody {
    activity_id: i64,
}

/// The attendee id comes from the verified session, never the body.
pub async fn enroll_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(body): Json<EnrollBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let confirmation = enrollment_service::enroll(
        &state.pool,
        state.mailer.as_ref(),
        auth_user.attendee_id,
        body.activity_id,
    )
    .await
    .map_err(error_response)?;

    Ok(Json(json!({
        "message": "Inscripción completada y correo con QR enviado ✅",
        "enrollment_id": confirmation.enrollment_id,
        "recipient": confirmation.recipient,
    })))
}

/// Scan endpoint. `code` may be the bare enrollment id or the full QR
/// payload; the response status is one of success / warning / error.
pub async fn verify_handler(
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match enrollment_service::confirm_attendance(&state.pool, &code).await {
        Ok(ScanOutcome::Confirmed(detail)) => Ok(Json(json!({
            "status": "success",
            "message": format!("✅ Asistencia confirmada para {}", detail.full_name),
            "data": detail,
        }))),
        Ok(ScanOutcome::AlreadyConfirmed(detail)) => Ok(Json(json!({
            "status": "warning",
            "message": "⚠️ Código ya escaneado. La asistencia ya fue confirmada.",
            "data": detail,
        }))),
        Err(e) => Err(error_response(e)),
    }
}
