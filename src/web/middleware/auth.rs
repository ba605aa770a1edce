use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::AppState;

/// Identity of the logged-in attendee, injected into request extensions
/// once the session token has been verified. Handlers trust this value
/// and never a client-supplied id.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub attendee_id: i64,
    pub email: String,
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split("; ")
                .find(|c| c.starts_with("access_token="))
                .and_then(|c| c.strip_prefix("access_token="))
        });

    if let Some(token) = token {
        if let Some(claims) = state.sessions.verify(token) {
            request.extensions_mut().insert(AuthenticatedUser {
                attendee_id: claims.sub,
                email: claims.email,
            });
            return next.run(request).await;
        }
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "status": "error",
            "error": "unauthorized",
            "message": "Inicia sesión para continuar"
        })),
    )
        .into_response()
}
