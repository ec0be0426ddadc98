use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use lostfound_core::ServiceError;

use crate::api::AppState;
use crate::model::Role;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/login", post(log_in))
        .route("/auth/logout", post(log_out))
        .route("/auth/session", get(session))
}

#[derive(Debug, Deserialize)]
struct SignUpRequest {
    username: String,
    password: String,
    /// Accepts current and legacy role names ("student", "teacher", ...).
    role: String,
}

#[derive(Debug, Deserialize)]
struct LogInRequest {
    username: String,
    password: String,
}

async fn sign_up(
    State(svc): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let role = Role::parse(&req.role)
        .ok_or_else(|| ServiceError::Validation(format!("unknown role '{}'", req.role)))?;
    let user = svc
        .sign_up(&req.username, &req.password, role)
        .map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::json!({"username": user.username, "role": user.role})),
    ))
}

async fn log_in(
    State(svc): State<AppState>,
    Json(req): Json<LogInRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let session = svc
        .log_in(&req.username, &req.password)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(session).map_err(|e| ServiceError::Internal(e.to_string()))?))
}

async fn log_out(State(svc): State<AppState>) -> Result<axum::http::StatusCode, ServiceError> {
    svc.log_out().map_err(ServiceError::from)?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

async fn session(State(svc): State<AppState>) -> Json<serde_json::Value> {
    match svc.current_session() {
        Some(s) => Json(serde_json::json!({"session": s})),
        None => Json(serde_json::json!({"session": null})),
    }
}
