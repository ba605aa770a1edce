use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use cookie::Cookie;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::services::account_service::{self, RegisterInput};
use crate::services::error::WorkflowError;
use crate::web::routes::error_response;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    email: String,
    password: String,
}

pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterInput>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    account_service::register(&state.pool, body)
        .await
        .map_err(error_response)?;
    Ok(Json(json!({ "message": "Usuario registrado correctamente ✅" })))
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let profile = account_service::authenticate(&state.pool, &body.email, &body.password)
        .await
        .map_err(error_response)?;

    let token = state
        .sessions
        .issue(profile.attendee_id, &profile.email)
        .map_err(error_response)?;

    let mut cookie = Cookie::new("access_token", token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(cookie::SameSite::Lax);

    let header_value = cookie
        .to_string()
        .parse()
        .map_err(|_| error_response(WorkflowError::Internal("cookie inválida".to_string())))?;

    let mut response = Json(json!({
        "message": "Login exitoso ✅",
        "user": profile,
    }))
    .into_response();
    response.headers_mut().append(header::SET_COOKIE, header_value);
    Ok(response)
}

pub async fn logout_handler() -> Result<Response, (StatusCode, Json<Value>)> {
    let mut cookie = Cookie::new("access_token", "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(cookie::SameSite::Lax);
    cookie.make_removal();

    let header_value = cookie
        .to_string()
        .parse()
        .map_err(|_| error_response(WorkflowError::Internal("cookie inválida".to_string())))?;

    let mut response = Json(json!({ "message": "Sesión cerrada" })).into_response();
    response.headers_mut().append(header::SET_COOKIE, header_value);
    Ok(response)
}
