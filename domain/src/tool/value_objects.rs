//! Tool domain value objects — immutable result and error types
//!
//! Every tool execution produces a [`ToolResult`]. Failures are values, not
//! panics: a [`ToolError`] pairs a [`ToolErrorKind`] tag with the message the
//! model sees. The `Display` form is the model-facing contract — always
//! `Error: {message}` — while the kind is what code and tests branch on.

use serde::{Deserialize, Serialize};

/// Classification of a tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolErrorKind {
    /// Resolved path escapes the working root.
    ConfinementViolation,
    /// Target does not exist.
    NotFound,
    /// Target exists but is not a directory.
    NotADirectory,
    /// Target exists but is not a regular file.
    NotAFile,
    /// File content is not decodable as UTF-8 text.
    UnsupportedEncoding,
    /// Operating-system access denial.
    PermissionDenied,
    /// Script path lacks the required extension.
    ExtensionMismatch,
    /// Child process exceeded the wall-clock bound.
    ExecutionTimeout,
    /// Invocation name not present in the catalog.
    UnknownTool,
    /// Arguments failed validation against the tool definition.
    InvalidArgument,
    /// Any other I/O failure.
    Io,
}

/// Error that occurred during tool execution.
///
/// The message text is normative at the model boundary: tools phrase their
/// failures exactly once, here, and the orchestration loop renders them via
/// `Display` without rewording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn confinement(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::ConfinementViolation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message)
    }

    pub fn not_a_directory(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotADirectory, message)
    }

    pub fn not_a_file(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotAFile, message)
    }

    pub fn unsupported_encoding(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::UnsupportedEncoding, message)
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::PermissionDenied, message)
    }

    pub fn extension_mismatch(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::ExtensionMismatch, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::ExecutionTimeout, message)
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::new(
            ToolErrorKind::UnknownTool,
            format!("Unknown function: {}", name),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArgument, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Io, message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution, carrying output or error information.
///
/// Produced by the sandboxed tool executor and consumed by the orchestration
/// loop, which folds it back into the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output content (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Metadata about the execution
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about tool execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Number of bytes processed/returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// For file operations: the affected path as the model supplied it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// For script execution: exit code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            error: None,
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ToolResultMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// The string the model receives for this result.
    ///
    /// Success payload as-is; failures rendered through the `Error: ...`
    /// contract.
    pub fn model_text(&self) -> String {
        match (&self.output, &self.error) {
            (Some(output), _) => output.clone(),
            (None, Some(error)) => error.to_string(),
            (None, None) => String::new(),
        }
    }
}
