//! Run Instruction use case.
//!
//! The orchestration loop: seed the conversation with the user instruction,
//! query the model with the tool catalog, dispatch every requested tool call
//! strictly in order, fold the results back, and repeat until the model
//! produces a final text answer or the iteration ceiling is reached.
//!
//! Tool failures never terminate the loop — they are folded back into the
//! conversation as `Error: ...` results so the model can react. Only a
//! transport failure or the ceiling ends the run without an answer, and
//! nothing is retried.

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, ToolResultMessage};
use crate::ports::progress::ProgressNotifier;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::tool_helpers::tool_args_preview;
use sandpiper_domain::{Conversation, PromptTemplate, TokenUsage, ToolResultRecord};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that terminate an instruction run without a final answer.
#[derive(Error, Debug)]
pub enum RunInstructionError {
    /// The LLM collaborator could not be reached or returned malformed data.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The loop hit the iteration ceiling while the model was still working.
    #[error("Maximum iterations ({0}) reached without completion")]
    IterationLimitExceeded(usize),

    /// The model returned neither tool calls nor text.
    #[error("No response text or function calls received")]
    EmptyResponse,
}

/// Input for the [`RunInstructionUseCase`].
#[derive(Debug, Clone)]
pub struct RunInstructionInput {
    /// The user's natural-language instruction.
    pub instruction: String,
    /// Model identifier passed to the gateway.
    pub model: String,
    /// Loop control parameters.
    pub execution: ExecutionParams,
}

impl RunInstructionInput {
    pub fn new(instruction: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            model: model.into(),
            execution: ExecutionParams::default(),
        }
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }
}

/// Result of a completed instruction run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The model's final text answer.
    pub answer: String,
    /// Number of tool rounds that were dispatched.
    pub iterations: usize,
    /// Token totals accumulated across every exchange.
    pub usage: TokenUsage,
    /// The full transcript, for diagnostics.
    pub conversation: Conversation,
}

/// Use case driving one instruction to completion.
pub struct RunInstructionUseCase {
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    tool_schema: Arc<dyn ToolSchemaPort>,
}

impl RunInstructionUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
    ) -> Self {
        Self {
            gateway,
            tool_executor,
            tool_schema,
        }
    }

    /// Execute the instruction with progress callbacks.
    pub async fn execute(
        &self,
        input: RunInstructionInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<RunOutcome, RunInstructionError> {
        info!(model = %input.model, "Starting instruction run");

        let session = self
            .gateway
            .create_session_with_system_prompt(&input.model, &PromptTemplate::agent_system())
            .await?;

        let tools = self.tool_schema.catalog_schema(self.tool_executor.tool_spec());
        let max_iterations = input.execution.max_iterations;

        let mut conversation = Conversation::new(&input.instruction);
        let mut usage = TokenUsage::default();
        let mut iterations = 0usize;

        let mut response = session.send_with_tools(&input.instruction, &tools).await?;

        loop {
            if let Some(exchange) = response.usage {
                usage.absorb(exchange);
            }
            conversation.push_model_turn(response.content.clone());

            let tool_calls = response.tool_calls();

            if tool_calls.is_empty() {
                let answer = response.text_content();
                if answer.is_empty() {
                    warn!("Model returned neither text nor tool calls");
                    return Err(RunInstructionError::EmptyResponse);
                }
                info!(iterations, "Instruction completed");
                return Ok(RunOutcome {
                    answer,
                    iterations,
                    usage,
                    conversation,
                });
            }

            iterations += 1;
            debug!(
                round = iterations,
                calls = tool_calls.len(),
                "Dispatching tool calls"
            );

            // Dispatch strictly in the order the model issued the calls. The
            // transcript is an ordered append log, so no parallelism here.
            let mut result_messages = Vec::with_capacity(tool_calls.len());
            let mut records = Vec::with_capacity(tool_calls.len());
            for (index, call) in tool_calls.iter().enumerate() {
                progress.on_tool_call(&call.tool_name, &tool_args_preview(call));

                let result = self.tool_executor.execute(call).await;
                let is_error = !result.is_success();
                let output = result.model_text();
                progress.on_tool_result(&call.tool_name, &output, is_error);

                let call_id = call
                    .native_id
                    .clone()
                    .unwrap_or_else(|| format!("round-{}-call-{}", iterations, index));
                records.push(ToolResultRecord {
                    call_id: call_id.clone(),
                    tool_name: call.tool_name.clone(),
                    output: output.clone(),
                    is_error,
                });
                result_messages.push(ToolResultMessage {
                    tool_use_id: call_id,
                    tool_name: call.tool_name.clone(),
                    output,
                    is_error,
                });
            }
            conversation.push_tool_results(records);
            debug_assert!(conversation.unanswered_calls().is_empty());

            if iterations >= max_iterations {
                warn!(max_iterations, "Iteration ceiling reached");
                return Err(RunInstructionError::IterationLimitExceeded(max_iterations));
            }

            response = session.send_tool_results(&result_messages).await?;
        }
    }
}
