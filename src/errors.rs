use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;
use serde_json::json;

/// Structured error body returned to clients: `{ "code": u16, "message": "..." }`.
///
/// Provider-originated error detail never ends up here; handlers log it
/// server-side and respond with a fixed generic message.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
}

impl ApiError {
    /// Create a new ApiError with a message and status code
    pub fn new<S: ToString>(message: S, status_code: StatusCode) -> Self {
        Self {
            message: message.to_string(),
            status_code,
        }
    }

    /// Create new Bad Request Error (400) with a message
    pub fn bad_request<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST)
    }

    /// Create new Unauthorized Error (401) with a message
    pub fn unauthorized<S: ToString>(message: S) -> Self {
        Self::new(message, StatusCode::UNAUTHORIZED)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code;
        let body = json!({
            "code": status_code.as_u16(),
            "message": self.message,
        });
        (status_code, Json(body)).into_response()
    }
}
