use crate::openapi::META_TAG;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A known route, advertised with an absolute URL built from the
/// configured virtual host.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub(crate) struct Endpoint {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Response for the endpoint listing
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub(crate) struct EndpointListing {
    pub status: String,
    pub endpoints: Vec<Endpoint>,
}

#[utoipa::path(
    get,
    path = "/",
    tag = META_TAG,
    responses(
        (status = 200, description = "Gateway is up, lists known endpoints", body = EndpointListing)
    )
)]
pub(super) async fn index_handler(State(state): State<AppState>) -> Json<EndpointListing> {
    let host = &state.config.virtual_host;
    let endpoint = |path: &str, method: Option<&str>| Endpoint {
        url: format!("https://{host}{path}"),
        method: method.map(str::to_string),
    };

    Json(EndpointListing {
        status: "ok".to_string(),
        endpoints: vec![
            endpoint("/", None),
            endpoint("/auth", None),
            endpoint("/session", Some("post")),
            endpoint("/logout", Some("post")),
        ],
    })
}
