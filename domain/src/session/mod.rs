//! LLM session model
//!
//! - [`response`] — provider-neutral structured model output
//! - [`conversation`] — the ordered transcript driving the next model query

pub mod conversation;
pub mod response;

pub use conversation::{Conversation, ToolResultRecord, Turn};
pub use response::{ContentBlock, LlmResponse, StopReason, TokenUsage};
