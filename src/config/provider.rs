use confique::Config;

/// Configuration for the identity provider the gateway delegates
/// credential verification to.
#[derive(Debug, Config, Clone)]
pub struct ProviderConfig {
    /// Base URL of the identity provider (default: http://localhost:9099)
    #[config(env = "GATEWAY_PROVIDER_URL", default = "http://localhost:9099")]
    pub url: String,

    /// API key sent as a bearer header on provider calls (default: empty)
    #[config(env = "GATEWAY_PROVIDER_API_KEY", default = "")]
    pub api_key: String,

    /// The timeout for provider calls in seconds (default: 5)
    #[config(env = "GATEWAY_PROVIDER_TIMEOUT", default = 5)]
    pub timeout: u64,
}
