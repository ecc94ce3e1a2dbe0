pub(crate) mod auth;
pub(crate) mod index;
pub(crate) mod session;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;

/// Combines all API routes into a single router. The visitor-context
/// layer is applied around the finished router in `create_app` so it
/// runs before routing.
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index::index_handler))
        .route("/auth", get(auth::auth_handler))
        .route("/session", post(session::session_handler))
        .route("/logout", post(session::logout_handler))
}
