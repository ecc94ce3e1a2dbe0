mod http;

pub use http::HttpVerifier;

use ::http::StatusCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

/// An authenticated identity as returned by the identity provider.
/// Beyond the subject identifier the claims are opaque to the gateway.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Identity {
    /// Unique subject identifier
    pub sub: String,
    /// Remaining provider claims, passed through untouched
    #[serde(flatten, default, skip_serializing_if = "HashMap::is_empty")]
    pub claims: HashMap<String, serde_json::Value>,
}

/// Errors that can occur when verifying credentials against the
/// identity provider. All variants surface to clients identically
/// (401 with a generic message); the distinction only matters for
/// server-side logging.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Failed to reach identity provider: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Identity provider rejected the credential with status {status}: {detail}")]
    Rejected { status: StatusCode, detail: String },
    #[error("Failed to parse identity provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Boundary to the identity provider. Injected into handlers through
/// `AppState` so tests can substitute a mocked provider.
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Verify an ID token presented as a bearer credential.
    async fn verify_id_token(&self, token: &str) -> Result<Identity, VerificationError>;

    /// Verify a previously issued session cookie.
    async fn verify_session_cookie(&self, cookie: &str) -> Result<Identity, VerificationError>;

    /// Exchange a valid ID token for a session cookie with the given
    /// lifetime. Fails if the token is invalid at call time.
    async fn create_session_cookie(
        &self,
        token: &str,
        expires_in: Duration,
    ) -> Result<String, VerificationError>;
}
