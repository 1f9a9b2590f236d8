//! Execution parameters — orchestration loop control.
//!
//! The iteration ceiling is an explicit parameter here, not a literal buried
//! in the loop, so tests can drive the loop with small ceilings.

use serde::{Deserialize, Serialize};

/// Default iteration ceiling for a single instruction run.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Orchestration loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum number of model rounds before the run is abandoned.
    pub max_iterations: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ExecutionParams {
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }
}
