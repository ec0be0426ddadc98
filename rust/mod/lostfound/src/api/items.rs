use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use lostfound_core::ServiceError;

use crate::api::AppState;
use crate::model::{ItemStatus, ReportInput};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(search_catalog).post(submit_report))
        .route("/items/mine", get(my_items))
        .route("/items/pending", get(pending_items))
        .route("/items/{id}/approve", post(approve))
        .route("/items/{id}/reject", post(reject))
        .route("/items/{id}/status", put(set_status))
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(default)]
    category: String,
}

#[derive(Debug, Deserialize)]
struct StatusRequest {
    status: String,
}

async fn search_catalog(
    State(svc): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<serde_json::Value> {
    let items = svc.search_catalog(&params.q, &params.category);
    Json(serde_json::json!({"items": items}))
}

async fn submit_report(
    State(svc): State<AppState>,
    Json(input): Json<ReportInput>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let session = svc.current_session();
    let item = svc
        .submit_report(session.as_ref(), input)
        .map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::to_value(item).map_err(|e| ServiceError::Internal(e.to_string()))?),
    ))
}

/// Items the logged-in finder reported, across pending and approved. For
/// the admin this is every item in either collection.
async fn my_items(State(svc): State<AppState>) -> Result<Json<serde_json::Value>, ServiceError> {
    let session = svc
        .current_session()
        .ok_or_else(|| ServiceError::Unauthorized("not logged in".into()))?;
    let is_admin = session.role == crate::model::Role::Admin;
    let items = svc.items_visible_to_finder(&session.username, is_admin);
    Ok(Json(serde_json::json!({"items": items})))
}

/// The moderation queue, newest first. Admin only.
async fn pending_items(State(svc): State<AppState>) -> Result<Json<serde_json::Value>, ServiceError> {
    let session = svc.current_session();
    let items = svc.pending_items(session.as_ref()).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({"items": items})))
}

async fn approve(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let session = svc.current_session();
    let item = svc.approve(session.as_ref(), &id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(item).map_err(|e| ServiceError::Internal(e.to_string()))?))
}

async fn reject(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<axum::http::StatusCode, ServiceError> {
    let session = svc.current_session();
    svc.reject(session.as_ref(), &id).map_err(ServiceError::from)?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

async fn set_status(
    State(svc): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    // Closed enum: anything outside the four catalog statuses fails here.
    let status: ItemStatus = req.status.parse().map_err(ServiceError::Validation)?;
    let session = svc.current_session();
    let item = svc
        .set_status(session.as_ref(), &id, status)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::to_value(item).map_err(|e| ServiceError::Internal(e.to_string()))?))
}
