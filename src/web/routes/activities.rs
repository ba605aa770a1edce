use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::Value;
use tracing::warn;

use crate::services::activity_service::{self, ActivityOverviewView, ActivityView};
use crate::services::error::WorkflowError;
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::routes::error_response;
use crate::AppState;

/// Public listing, ordered by date then start time.
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityView>>, (StatusCode, Json<Value>)> {
    match activity_service::list(&state.pool).await {
        Ok(views) => Ok(Json(views)),
        Err(e) => {
            warn!("No se pudieron cargar las actividades: {}", e);
            Err(error_response(WorkflowError::Database(e)))
        }
    }
}

/// Listing enriched for the logged-in attendee: enrollment counts plus an
/// already-enrolled flag.
pub async fn overview_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityOverviewView>>, (StatusCode, Json<Value>)> {
    match activity_service::overview_for(&state.pool, auth_user.attendee_id).await {
        Ok(views) => Ok(Json(views)),
        Err(e) => {
            warn!("No se pudieron cargar las actividades: {}", e);
            Err(error_response(WorkflowError::Database(e)))
        }
    }
}
