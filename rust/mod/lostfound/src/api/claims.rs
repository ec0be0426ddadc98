use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use lostfound_core::ServiceError;

use crate::api::AppState;
use crate::model::ClaimInput;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/claims", get(all_claims).post(file_claim))
        .route("/claims/on-my-reports", get(claims_on_my_reports))
        .route("/items/{id}/claims", get(claims_for_item))
}

async fn file_claim(
    State(svc): State<AppState>,
    Json(input): Json<ClaimInput>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let session = svc.current_session();
    let claim = svc
        .file_claim(session.as_ref(), input)
        .map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::to_value(claim).map_err(|e| ServiceError::Internal(e.to_string()))?),
    ))
}

/// The full claim ledger. Admin only.
async fn all_claims(State(svc): State<AppState>) -> Result<Json<serde_json::Value>, ServiceError> {
    let session = svc.current_session();
    let claims = svc.all_claims(session.as_ref()).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({"items": claims})))
}

async fn claims_for_item(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Json<serde_json::Value> {
    let claims = svc.claims_for_item(&id);
    Json(serde_json::json!({"items": claims}))
}

/// Claims filed against the logged-in finder's approved submissions.
async fn claims_on_my_reports(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let session = svc
        .current_session()
        .ok_or_else(|| ServiceError::Unauthorized("not logged in".into()))?;
    let claims = svc.claims_reported_by(&session.username);
    Ok(Json(serde_json::json!({"items": claims})))
}
