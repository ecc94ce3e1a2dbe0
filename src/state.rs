use crate::config::GatewayConfig;
use crate::verifier::{HttpVerifier, Verifier};
use std::sync::Arc;

/// Shared per-request state: configuration plus the verifier boundary
/// to the identity provider. The verifier is held as a trait object so
/// tests can inject a fake provider.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub verifier: Arc<dyn Verifier>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        let verifier = Arc::new(HttpVerifier::new(&config.provider));
        Self {
            config: Arc::new(config),
            verifier,
        }
    }

    pub fn with_verifier(config: GatewayConfig, verifier: Arc<dyn Verifier>) -> Self {
        Self {
            config: Arc::new(config),
            verifier,
        }
    }
}
