//! Configuration file schema.
//!
//! Every field has a default, so an absent config file is a valid
//! configuration. The API credential is deliberately not part of this
//! schema — it is read from the environment only.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub workspace: WorkspaceConfig,
    pub model: ModelConfig,
    pub limits: LimitsConfig,
}

/// `[workspace]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// The sandbox directory all tool operations are confined to.
    /// Created at startup if missing.
    pub root: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: "sandbox".to_string(),
        }
    }
}

/// `[model]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Gemini model identifier.
    pub name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.0-flash-001".to_string(),
        }
    }
}

/// `[limits]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum model rounds per instruction.
    pub max_iterations: usize,
    /// Character count at which read_file truncates.
    pub max_read_chars: usize,
    /// Wall-clock bound for run_script children, in seconds.
    pub script_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            max_read_chars: 10_000,
            script_timeout_secs: 30,
        }
    }
}
