//! The conversation transcript.
//!
//! An append-only, ordered log of turns: the seeding user instruction, each
//! model turn, and the tool results produced for that turn. The log is owned
//! exclusively by the orchestration loop; nothing mutates past turns.
//!
//! Invariant: every tool call in a model turn is answered by exactly one
//! [`ToolResultRecord`] before the next model turn is appended.
//! [`unanswered_calls`](Conversation::unanswered_calls) exposes the check.

use super::response::ContentBlock;
use serde::{Deserialize, Serialize};

/// One recorded tool outcome, correlated to its call by `call_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResultRecord {
    pub call_id: String,
    pub tool_name: String,
    pub output: String,
    pub is_error: bool,
}

/// A single turn in the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Turn {
    User { text: String },
    Model { content: Vec<ContentBlock> },
    ToolResults { results: Vec<ToolResultRecord> },
}

/// Ordered, append-only conversation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Seed the transcript with the single user instruction.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::User {
                text: instruction.into(),
            }],
        }
    }

    pub fn push_model_turn(&mut self, content: Vec<ContentBlock>) {
        self.turns.push(Turn::Model { content });
    }

    pub fn push_tool_results(&mut self, results: Vec<ToolResultRecord>) {
        self.turns.push(Turn::ToolResults { results });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// IDs of tool calls issued by the model that have no recorded result yet.
    pub fn unanswered_calls(&self) -> Vec<&str> {
        let mut pending: Vec<&str> = Vec::new();
        for turn in &self.turns {
            match turn {
                Turn::Model { content } => {
                    for block in content {
                        if let Some((id, _, _)) = block.as_tool_use() {
                            pending.push(id);
                        }
                    }
                }
                Turn::ToolResults { results } => {
                    for result in results {
                        pending.retain(|id| *id != result.call_id);
                    }
                }
                Turn::User { .. } => {}
            }
        }
        pending
    }

    /// Text of the last model turn, if any.
    pub fn last_model_text(&self) -> Option<String> {
        self.turns.iter().rev().find_map(|turn| match turn {
            Turn::Model { content } => {
                let text: String = content.iter().filter_map(|b| b.as_text()).collect();
                (!text.is_empty()).then_some(text)
            }
            _ => None,
        })
    }
}
