//! LLM Gateway port
//!
//! Defines the interface for communicating with the LLM collaborator. The
//! application layer only ever sees this trait pair; the HTTP adapter lives
//! in the infrastructure layer. Any error from the gateway is a transport
//! failure as far as the orchestration loop is concerned — it terminates the
//! run, with no retry.

use async_trait::async_trait;
use sandpiper_domain::LlmResponse;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// The outcome of one tool call, sent back to the model.
#[derive(Debug, Clone)]
pub struct ToolResultMessage {
    /// ID of the tool-use block this result answers.
    pub tool_use_id: String,
    /// Name of the tool that produced the result.
    pub tool_name: String,
    /// The result payload (success output or `Error: ...` text).
    pub output: String,
    /// Whether the tool reported a failure.
    pub is_error: bool,
}

/// Gateway for LLM communication
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session for the given model with a system prompt.
    async fn create_session_with_system_prompt(
        &self,
        model: &str,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active LLM session.
///
/// The session owns the provider-level message history; callers only append
/// via the two send methods and read structured [`LlmResponse`]s.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// The model this session talks to.
    fn model(&self) -> &str;

    /// Send a user message together with the tool catalog schemas.
    async fn send_with_tools(
        &self,
        message: &str,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError>;

    /// Send tool results for the previous round and get the next response.
    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError>;
}
