//! Small helpers shared by use cases.

use sandpiper_domain::ToolCall;

/// Render a call's arguments for progress output.
///
/// Keys are sorted so the preview is stable across runs.
pub fn tool_args_preview(call: &ToolCall) -> String {
    let mut keys: Vec<_> = call.arguments.keys().collect();
    keys.sort();
    let rendered: Vec<String> = keys
        .into_iter()
        .map(|k| format!("{}: {}", k, call.arguments[k]))
        .collect();
    format!("{{{}}}", rendered.join(", "))
}
