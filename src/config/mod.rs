pub mod provider;

pub use provider::ProviderConfig;

use confique::Config;

/// Main configuration structure for the gateway, read from `GATEWAY_*`
/// environment variables.
#[derive(Debug, Config, Clone)]
pub struct GatewayConfig {
    /// The port the gateway will listen to (default: 5000)
    #[config(env = "GATEWAY_PORT", default = 5000)]
    pub port: u16,

    /// Virtual host name used to build absolute URLs in the endpoint
    /// listing returned by `GET /` (default: localhost)
    #[config(env = "GATEWAY_VIRTUAL_HOST", default = "localhost")]
    pub virtual_host: String,

    /// Identity provider configuration
    #[config(nested)]
    pub provider: ProviderConfig,
}

impl GatewayConfig {
    /// Creates a new configuration from environment variables
    pub fn new() -> Result<Self, confique::Error> {
        Self::builder().env().load()
    }

    #[cfg(test)]
    pub fn for_test_with_mock(provider_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            virtual_host: "gateway.test".to_string(),
            provider: ProviderConfig {
                url: provider_mock.uri(),
                api_key: "test_api_key".to_string(),
                timeout: 5,
            },
        }
    }
}
