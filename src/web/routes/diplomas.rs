use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::services::diploma_service::{self, EligibleActivityView};
use crate::web::routes::error_response;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DiplomaRequestBody {
    email: String,
    activity_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EligibleActivitiesBody {
    email: String,
}

pub async fn request_handler(
    State(state): State<AppState>,
    Json(body): Json<DiplomaRequestBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let recipient = diploma_service::issue(
        &state.pool,
        state.mailer.as_ref(),
        &body.email,
        body.activity_id,
    )
    .await
    .map_err(error_response)?;

    Ok(Json(json!({
        "message": format!("🎓 Diploma enviado correctamente a {}", recipient),
    })))
}

pub async fn eligible_activities_handler(
    State(state): State<AppState>,
    Json(body): Json<EligibleActivitiesBody>,
) -> Result<Json<Vec<EligibleActivityView>>, (StatusCode, Json<Value>)> {
    diploma_service::eligible_activities(&state.pool, &body.email)
        .await
        .map(Json)
        .map_err(error_response)
}
