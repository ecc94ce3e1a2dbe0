use utoipa::OpenApi;

pub(crate) const META_TAG: &str = "Meta API";
pub(crate) const AUTH_TAG: &str = "Authentication API";
pub(crate) const SESSION_TAG: &str = "Session API";

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = META_TAG, description = "Endpoint discovery"),
        (name = AUTH_TAG, description = "Credential verification endpoints"),
        (name = SESSION_TAG, description = "Session issuance and teardown endpoints"),
    ),
    info(
        title = "Auth Gateway API",
        description = "Authentication gateway in front of an external identity provider",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;
