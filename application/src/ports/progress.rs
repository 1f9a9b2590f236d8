//! Progress notification port
//!
//! Callbacks the orchestration loop emits while working, so the CLI can
//! print per-call lines without the use case knowing about consoles.

/// Observer for orchestration progress.
pub trait ProgressNotifier: Send + Sync {
    /// A tool call is about to be dispatched.
    fn on_tool_call(&self, tool_name: &str, args_preview: &str) {
        let _ = (tool_name, args_preview);
    }

    /// A tool call finished.
    fn on_tool_result(&self, tool_name: &str, output: &str, is_error: bool) {
        let _ = (tool_name, output, is_error);
    }
}

/// No-op progress notifier for tests and quiet runs.
pub struct NoProgress;

impl ProgressNotifier for NoProgress {}
