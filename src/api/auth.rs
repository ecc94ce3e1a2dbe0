use crate::credentials::{cookie_map, header_map, Credential};
use crate::errors::ApiError;
use crate::openapi::AUTH_TAG;
use crate::state::AppState;
use crate::verifier::Identity;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Outcome payload for the authorization decision. `user` is present
/// only when a credential verified successfully; the request's cookies
/// and headers are echoed back for diagnostics either way.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub(crate) struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    pub cookies: HashMap<String, String>,
    pub headers: HashMap<String, String>,
}

/// Single-pass authorization decision.
///
/// The first credential in precedence order is verified: a session
/// cookie when present, otherwise a bearer token. A failed
/// session-cookie check never falls back to the bearer token, even
/// when both were presented.
#[utoipa::path(
    get,
    path = "/auth",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Credential verified", body = AuthResponse),
        (status = 401, description = "No credential presented, or verification failed")
    )
)]
pub(super) async fn auth_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let echo = AuthResponse {
        user: None,
        cookies: cookie_map(&headers),
        headers: header_map(&headers),
    };

    let verified = match Credential::extract(&headers).into_iter().next() {
        Some(Credential::SessionCookie(cookie)) => {
            Some(state.verifier.verify_session_cookie(&cookie).await)
        }
        Some(Credential::BearerToken(token)) => {
            Some(state.verifier.verify_id_token(&token).await)
        }
        None => None,
    };

    match verified {
        Some(Ok(identity)) => (
            StatusCode::OK,
            Json(AuthResponse {
                user: Some(identity),
                ..echo
            }),
        )
            .into_response(),
        Some(Err(err)) => {
            // Detail stays in the server log; clients get a fixed message
            log::warn!("Credential verification failed: {}", err);
            ApiError::unauthorized("Unauthorized: credential verification failed").into_response()
        }
        None => (StatusCode::UNAUTHORIZED, Json(echo)).into_response(),
    }
}
