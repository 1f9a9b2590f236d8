//! Gemini LLM gateway

use async_trait::async_trait;
use sandpiper_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use std::time::Duration;

use super::session::GeminiSession;

/// Base URL for the Gemini REST API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Per-request HTTP timeout. Generation can be slow; this is a transport
/// bound, not the tool-execution timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Gateway creating Gemini sessions over a shared HTTP client.
#[derive(Debug)]
pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiGateway {
    /// Create a gateway with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GatewayError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(GatewayError::MissingCredential(API_KEY_ENV.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a gateway from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, GatewayError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| GatewayError::MissingCredential(API_KEY_ENV.to_string()))?;
        Self::new(api_key)
    }

    /// Override the API base URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &str,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(GeminiSession::new(
            self.client.clone(),
            self.api_key.clone(),
            self.base_url.clone(),
            model.to_string(),
            system_prompt.to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_a_missing_credential() {
        let err = GeminiGateway::new("").unwrap_err();
        assert!(matches!(err, GatewayError::MissingCredential(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn sessions_carry_the_requested_model() {
        let gateway = GeminiGateway::new("test-key").unwrap();
        let session = gateway
            .create_session_with_system_prompt("gemini-2.0-flash-001", "be helpful")
            .await
            .unwrap();
        assert_eq!(session.model(), "gemini-2.0-flash-001");
    }
}
