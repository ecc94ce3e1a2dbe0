use super::{Identity, VerificationError, Verifier};
use crate::config::ProviderConfig;
use ::http::header::{AUTHORIZATION, CONTENT_TYPE};
use ::http::{HeaderMap, HeaderValue};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Verifier backed by the identity provider's HTTP API.
///
/// Wire surface:
///   POST {base}/v1/tokens:verify    {"token": t}   -> Identity JSON
///   POST {base}/v1/sessions:verify  {"session": c} -> Identity JSON
///   POST {base}/v1/sessions:create  {"token": t, "expires_in_ms": n}
///                                                  -> {"session": s}
///
/// No retries and no fallback between paths; a non-2xx response maps
/// to `VerificationError::Rejected` with the body text as detail.
pub struct HttpVerifier {
    client: Client,
    base_url: String,
}

impl HttpVerifier {
    pub fn new(config: &ProviderConfig) -> Self {
        let mut headers = HeaderMap::new();
        if !config.api_key.is_empty() {
            if let Ok(value) = format!("Bearer {}", config.api_key).parse() {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Specialized client for provider calls with appropriate configurations
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .connect_timeout(Duration::from_secs(2))
            .default_headers(headers)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .expect("Failed to create identity provider client");

        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        }
    }

    /// Generic POST to the provider, parsing a 2xx body as `R`
    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, VerificationError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("Calling identity provider at: {}", url);

        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(VerificationError::Rejected { status, detail });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[derive(Serialize)]
struct TokenVerifyRequest<'a> {
    token: &'a str,
}

#[derive(Serialize)]
struct SessionVerifyRequest<'a> {
    session: &'a str,
}

#[derive(Serialize)]
struct SessionCreateRequest<'a> {
    token: &'a str,
    expires_in_ms: u64,
}

#[derive(Deserialize)]
struct SessionCreateResponse {
    session: String,
}

#[async_trait]
impl Verifier for HttpVerifier {
    async fn verify_id_token(&self, token: &str) -> Result<Identity, VerificationError> {
        self.post_json("v1/tokens:verify", &TokenVerifyRequest { token })
            .await
    }

    async fn verify_session_cookie(&self, cookie: &str) -> Result<Identity, VerificationError> {
        self.post_json("v1/sessions:verify", &SessionVerifyRequest { session: cookie })
            .await
    }

    async fn create_session_cookie(
        &self,
        token: &str,
        expires_in: Duration,
    ) -> Result<String, VerificationError> {
        let request = SessionCreateRequest {
            token,
            expires_in_ms: expires_in.as_millis() as u64,
        };
        let response: SessionCreateResponse =
            self.post_json("v1/sessions:create", &request).await?;
        Ok(response.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::http::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_verifier(mock: &MockServer) -> HttpVerifier {
        HttpVerifier::new(&ProviderConfig {
            url: mock.uri(),
            api_key: "test_api_key".to_string(),
            timeout: 5,
        })
    }

    #[tokio::test]
    async fn test_verify_id_token_success() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/tokens:verify"))
            .and(body_json(json!({ "token": "tok-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sub": "user-1",
                "email": "user@example.com"
            })))
            .expect(1)
            .mount(&mock)
            .await;

        let identity = test_verifier(&mock)
            .verify_id_token("tok-1")
            .await
            .expect("verification should succeed");
        assert_eq!(identity.sub, "user-1");
        assert_eq!(identity.claims.get("email"), Some(&json!("user@example.com")));
    }

    #[tokio::test]
    async fn test_verify_session_cookie_rejected() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/sessions:verify"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string("session expired"),
            )
            .expect(1)
            .mount(&mock)
            .await;

        let err = test_verifier(&mock)
            .verify_session_cookie("stale-session")
            .await
            .expect_err("verification should fail");
        match err {
            VerificationError::Rejected { status, detail } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(detail, "session expired");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_session_cookie_carries_expiry() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/sessions:create"))
            .and(body_json(json!({
                "token": "tok-1",
                "expires_in_ms": 1_209_600_000u64
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "session": "sess-1" })),
            )
            .expect(1)
            .mount(&mock)
            .await;

        let session = test_verifier(&mock)
            .create_session_cookie("tok-1", Duration::from_millis(1_209_600_000))
            .await
            .expect("session creation should succeed");
        assert_eq!(session, "sess-1");
    }

    #[tokio::test]
    async fn test_malformed_provider_response() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/tokens:verify"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock)
            .await;

        let err = test_verifier(&mock)
            .verify_id_token("tok-1")
            .await
            .expect_err("parse should fail");
        assert!(matches!(err, VerificationError::Parse(_)));
    }
}
