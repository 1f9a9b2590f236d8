//! Gemini LLM session implementation
//!
//! Wraps the stateless `generateContent` API behind the `LlmSession` trait.
//! Conversation history lives here, resent in full on every call; the tool
//! catalog is captured on the first `send_with_tools` and attached to every
//! subsequent request.

use async_trait::async_trait;
use sandpiper_application::ports::llm_gateway::{
    GatewayError, LlmSession, ToolResultMessage,
};
use sandpiper_domain::LlmResponse;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

use super::types::{
    self, Content, GenerateContentRequest, GenerateContentResponse, ToolDeclarations,
};

pub struct GeminiSession {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    system_prompt: String,
    /// Conversation history (stateless API requires full history each call)
    history: Mutex<Vec<Content>>,
    /// Tool configuration (set when send_with_tools is first called)
    tools: Mutex<Option<Vec<ToolDeclarations>>>,
    /// Source for tool-use correlation IDs (the API assigns none)
    call_counter: AtomicU64,
}

impl GeminiSession {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        model: String,
        system_prompt: String,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
            system_prompt,
            history: Mutex::new(Vec::new()),
            tools: Mutex::new(None),
            call_counter: AtomicU64::new(0),
        }
    }

    /// Execute a generateContent call with the given message history.
    async fn generate(&self, contents: &[Content]) -> Result<(Content, LlmResponse), GatewayError> {
        let tools = self.tools.lock().await.clone();
        let request = GenerateContentRequest {
            system_instruction: Some(types::system_content(&self.system_prompt)),
            contents: contents.to_vec(),
            tools,
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!(model = %self.model, messages = contents.len(), "Calling Gemini generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::InvalidResponse("no candidates in response".to_string()))?;
        let content = candidate.content.ok_or_else(|| {
            GatewayError::InvalidResponse("candidate without content".to_string())
        })?;

        let llm_response = types::convert_candidate(
            &content,
            candidate.finish_reason.as_deref(),
            parsed.usage_metadata,
            &self.model,
            || format!("call-{}", self.call_counter.fetch_add(1, Ordering::Relaxed) + 1),
        );

        Ok((content, llm_response))
    }

    /// Append a message, call the API, and record the model's reply.
    async fn send_content(&self, content: Content) -> Result<LlmResponse, GatewayError> {
        let mut history = self.history.lock().await;
        history.push(content);

        let (model_content, response) = self.generate(&history).await?;
        history.push(model_content);

        Ok(response)
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &str {
        &self.model
    }

    async fn send_with_tools(
        &self,
        message: &str,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError> {
        if !tools.is_empty() {
            *self.tools.lock().await = Some(vec![ToolDeclarations {
                function_declarations: tools.to_vec(),
            }]);
        }
        self.send_content(types::user_text(message)).await
    }

    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError> {
        self.send_content(types::tool_results_content(results)).await
    }
}
