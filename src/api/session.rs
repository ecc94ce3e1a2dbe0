use crate::credentials::{bearer_token, SESSION_COOKIE};
use crate::errors::ApiError;
use crate::openapi::SESSION_TAG;
use crate::state::AppState;
use crate::verifier::Identity;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use utoipa::ToSchema;

/// Lifetime of an issued session cookie: two weeks.
pub(crate) const SESSION_MAX_AGE: Duration = Duration::from_millis(2 * 604_800_000);

/// Response for a successful session issuance. `custom_token` is a
/// reserved field no code path populates; it stays absent from the
/// serialized body.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionResponse {
    pub user: Identity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_token: Option<String>,
    pub id_token: String,
    pub session: String,
}

/// Exchanges a verified bearer token for a session cookie with a
/// fixed two-week lifetime. The two provider calls are sequential and
/// share one failure path; a failure after the token verified still
/// maps to 401.
#[utoipa::path(
    post,
    path = "/session",
    tag = SESSION_TAG,
    responses(
        (status = 200, description = "Session issued", body = SessionResponse),
        (status = 400, description = "Missing Authorization header"),
        (status = 401, description = "Token verification or session creation failed")
    )
)]
pub(super) async fn session_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return ApiError::bad_request("Bad Request: missing Authorization header").into_response();
    };

    let issued = async {
        let user = state.verifier.verify_id_token(&token).await?;
        let session = state
            .verifier
            .create_session_cookie(&token, SESSION_MAX_AGE)
            .await?;
        Ok::<_, crate::verifier::VerificationError>((user, session))
    }
    .await;

    match issued {
        Ok((user, session)) => (
            StatusCode::OK,
            Json(SessionResponse {
                user,
                custom_token: None,
                id_token: token,
                session,
            }),
        )
            .into_response(),
        Err(err) => {
            log::warn!("Session issuance failed: {}", err);
            ApiError::unauthorized("Unauthorized: credential verification failed").into_response()
        }
    }
}

/// Clears the session cookie. The provider's revocation API is not
/// called; the cookie simply stops being presented.
#[utoipa::path(
    post,
    path = "/logout",
    tag = SESSION_TAG,
    responses(
        (status = 200, description = "Session cookie cleared")
    )
)]
pub(super) async fn logout_handler(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true),
    );
    (jar, Json(json!({ "status": "ok" })))
}
