mod auth;
mod claims;
mod items;

use std::sync::Arc;

use axum::Router;

use crate::service::LostFoundService;

/// Shared application state.
pub type AppState = Arc<LostFoundService>;

/// Build the complete workflow API router.
///
/// All routes are relative — the caller nests them under the module name.
/// Handlers resolve the current session from the store and hand it to the
/// service layer; authorization lives there, never up here.
pub fn build_router(svc: Arc<LostFoundService>) -> Router {
    Router::new()
        .merge(auth::routes())
        .merge(items::routes())
        .merge(claims::routes())
        .with_state(svc)
}
