//! Console progress output for tool dispatch.

use sandpiper_application::ProgressNotifier;

/// Maximum characters of a tool result echoed in verbose mode.
const RESULT_PREVIEW_CHARS: usize = 400;

/// Prints per-call lines as the loop dispatches tools.
pub struct ConsoleProgress {
    verbose: bool,
}

impl ConsoleProgress {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressNotifier for ConsoleProgress {
    fn on_tool_call(&self, tool_name: &str, args_preview: &str) {
        if self.verbose {
            println!("Calling function: {}({})", tool_name, args_preview);
        } else {
            println!(" - Calling function: {}", tool_name);
        }
    }

    fn on_tool_result(&self, _tool_name: &str, output: &str, _is_error: bool) {
        if self.verbose {
            println!("-> {}", preview(output, RESULT_PREVIEW_CHARS));
        }
    }
}

fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}
