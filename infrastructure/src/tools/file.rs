//! File operation tools: read_file, write_file

use sandpiper_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use sandpiper_domain::workspace::WorkspaceRoot;
use std::fs;
use std::io::ErrorKind;
use std::time::Instant;

/// Tool name constants
pub const READ_FILE: &str = "read_file";
pub const WRITE_FILE: &str = "write_file";

/// Get the tool definition for read_file
pub fn read_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_FILE,
        "Read the text content of a file inside the working directory",
    )
    .with_parameter(ToolParameter::new(
        "file_path",
        "Path to the file, relative to the working directory",
        true,
    ))
}

/// Get the tool definition for write_file
pub fn write_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        WRITE_FILE,
        "Write content to a file inside the working directory, overwriting any existing content. Missing parent directories are created.",
    )
    .with_parameter(ToolParameter::new(
        "file_path",
        "Path to the file, relative to the working directory",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "content",
        "Content to write to the file",
        true,
    ))
}

/// Execute the read_file tool.
///
/// Content longer than `max_chars` characters is cut at exactly that many
/// characters, with a marker naming the file and the limit appended.
pub fn execute_read_file(root: &WorkspaceRoot, call: &ToolCall, max_chars: usize) -> ToolResult {
    let file_path = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(READ_FILE, ToolError::invalid_argument(e)),
    };

    let resolved = match root.resolve(file_path) {
        Ok(p) => p,
        Err(_) => {
            return ToolResult::failure(
                READ_FILE,
                ToolError::confinement(format!(
                    "Cannot read \"{}\" as it is outside the permitted working directory",
                    file_path
                )),
            );
        }
    };

    if !resolved.exists() {
        return ToolResult::failure(
            READ_FILE,
            ToolError::not_found(format!(
                "File not found or is not a regular file: \"{}\"",
                file_path
            )),
        );
    }
    if !resolved.is_file() {
        return ToolResult::failure(
            READ_FILE,
            ToolError::not_a_file(format!(
                "File not found or is not a regular file: \"{}\"",
                file_path
            )),
        );
    }

    let bytes = match fs::read(&resolved) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return ToolResult::failure(
                READ_FILE,
                ToolError::permission_denied(format!("Permission denied reading \"{}\"", file_path)),
            );
        }
        Err(e) => {
            return ToolResult::failure(
                READ_FILE,
                ToolError::io(format!("Failed to read \"{}\": {}", file_path, e)),
            );
        }
    };

    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(_) => {
            return ToolResult::failure(
                READ_FILE,
                ToolError::unsupported_encoding(format!(
                    "Cannot read \"{}\" - file appears to be binary or uses an unsupported encoding",
                    file_path
                )),
            );
        }
    };

    let output = truncate_with_marker(content, file_path, max_chars);
    let bytes_out = output.len();

    ToolResult::success(READ_FILE, output).with_metadata(ToolResultMetadata {
        bytes: Some(bytes_out),
        path: Some(file_path.to_string()),
        ..Default::default()
    })
}

/// Cut `content` at `max_chars` characters, appending the truncation marker.
fn truncate_with_marker(content: String, file_path: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut truncated = content[..cut].to_string();
            truncated.push_str(&format!(
                "[...File \"{}\" truncated at {} characters]",
                file_path, max_chars
            ));
            truncated
        }
        None => content,
    }
}

/// Execute the write_file tool.
///
/// Truncate-then-write: a second write to the same path fully replaces the
/// first, never appends.
pub fn execute_write_file(root: &WorkspaceRoot, call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let file_path = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(WRITE_FILE, ToolError::invalid_argument(e)),
    };
    let content = match call.require_string("content") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(WRITE_FILE, ToolError::invalid_argument(e)),
    };

    let resolved = match root.resolve(file_path) {
        Ok(p) => p,
        Err(_) => {
            return ToolResult::failure(
                WRITE_FILE,
                ToolError::confinement(format!(
                    "Cannot write to \"{}\" as it is outside the permitted working directory",
                    file_path
                )),
            );
        }
    };

    if let Some(parent) = resolved.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            return ToolResult::failure(WRITE_FILE, write_error(file_path, e));
        }
    }

    if let Err(e) = fs::write(&resolved, content) {
        return ToolResult::failure(WRITE_FILE, write_error(file_path, e));
    }

    let chars = content.chars().count();
    let duration_ms = start.elapsed().as_millis() as u64;

    ToolResult::success(
        WRITE_FILE,
        format!(
            "Successfully wrote to \"{}\" ({} characters written)",
            file_path, chars
        ),
    )
    .with_metadata(ToolResultMetadata {
        duration_ms: Some(duration_ms),
        bytes: Some(content.len()),
        path: Some(file_path.to_string()),
        ..Default::default()
    })
}

fn write_error(file_path: &str, e: std::io::Error) -> ToolError {
    if e.kind() == ErrorKind::PermissionDenied {
        ToolError::permission_denied(format!("Permission denied writing to \"{}\"", file_path))
    } else {
        ToolError::io(format!("Failed to write to \"{}\": {}", file_path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandpiper_domain::ToolErrorKind;
    use tempfile::tempdir;

    const MAX_CHARS: usize = 10_000;

    fn workspace() -> (tempfile::TempDir, WorkspaceRoot) {
        let dir = tempdir().unwrap();
        let root = WorkspaceRoot::new(dir.path().canonicalize().unwrap()).unwrap();
        (dir, root)
    }

    fn read_call(path: &str) -> ToolCall {
        ToolCall::new(READ_FILE).with_arg("file_path", path)
    }

    fn write_call(path: &str, content: &str) -> ToolCall {
        ToolCall::new(WRITE_FILE)
            .with_arg("file_path", path)
            .with_arg("content", content)
    }

    #[test]
    fn reads_file_content() {
        let (dir, root) = workspace();
        fs::write(dir.path().join("notes.txt"), "hello sandbox").unwrap();

        let result = execute_read_file(&root, &read_call("notes.txt"), MAX_CHARS);
        assert!(result.is_success());
        assert_eq!(result.output(), Some("hello sandbox"));
    }

    #[test]
    fn truncates_at_exactly_the_limit_with_marker() {
        let (dir, root) = workspace();
        fs::write(dir.path().join("big.txt"), "x".repeat(50)).unwrap();

        let result = execute_read_file(&root, &read_call("big.txt"), 10);
        let output = result.output().unwrap();
        assert!(output.starts_with(&"x".repeat(10)));
        assert!(!output.starts_with(&"x".repeat(11)));
        assert!(output.ends_with("[...File \"big.txt\" truncated at 10 characters]"));
    }

    #[test]
    fn content_at_the_limit_is_untouched() {
        let (dir, root) = workspace();
        fs::write(dir.path().join("exact.txt"), "x".repeat(10)).unwrap();

        let result = execute_read_file(&root, &read_call("exact.txt"), 10);
        assert_eq!(result.output(), Some("x".repeat(10).as_str()));
    }

    #[test]
    fn binary_content_reports_unsupported_encoding() {
        let (dir, root) = workspace();
        fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let result = execute_read_file(&root, &read_call("blob.bin"), MAX_CHARS);
        assert_eq!(
            result.error().unwrap().kind,
            ToolErrorKind::UnsupportedEncoding
        );
        assert_eq!(
            result.model_text(),
            "Error: Cannot read \"blob.bin\" - file appears to be binary or uses an unsupported encoding"
        );
    }

    #[test]
    fn missing_file_reports_not_found() {
        let (_dir, root) = workspace();
        let result = execute_read_file(&root, &read_call("ghost.txt"), MAX_CHARS);
        assert_eq!(result.error().unwrap().kind, ToolErrorKind::NotFound);
        assert_eq!(
            result.model_text(),
            "Error: File not found or is not a regular file: \"ghost.txt\""
        );
    }

    #[test]
    fn directory_target_reports_not_a_file() {
        let (dir, root) = workspace();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let result = execute_read_file(&root, &read_call("sub"), MAX_CHARS);
        assert_eq!(result.error().unwrap().kind, ToolErrorKind::NotAFile);
    }

    #[test]
    fn read_escape_is_rejected_even_for_existing_files() {
        let (_dir, root) = workspace();
        // /etc/hostname exists on most systems; existence must not matter
        let result = execute_read_file(&root, &read_call("../../../../etc/hostname"), MAX_CHARS);
        assert_eq!(
            result.error().unwrap().kind,
            ToolErrorKind::ConfinementViolation
        );
        assert_eq!(
            result.model_text(),
            "Error: Cannot read \"../../../../etc/hostname\" as it is outside the permitted working directory"
        );
    }

    #[test]
    fn writes_and_reports_character_count() {
        let (dir, root) = workspace();
        let result = execute_write_file(&root, &write_call("out.txt", "héllo"));

        assert!(result.is_success());
        // five characters, six bytes
        assert_eq!(
            result.output(),
            Some("Successfully wrote to \"out.txt\" (5 characters written)")
        );
        assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "héllo");
    }

    #[test]
    fn second_write_fully_overwrites() {
        let (dir, root) = workspace();
        execute_write_file(&root, &write_call("out.txt", "first version, quite long"));
        let result = execute_write_file(&root, &write_call("out.txt", "second"));

        assert!(result.is_success());
        assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "second");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let (dir, root) = workspace();
        let result = execute_write_file(&root, &write_call("a/b/c.txt", "nested"));

        assert!(result.is_success());
        assert_eq!(
            fs::read_to_string(dir.path().join("a/b/c.txt")).unwrap(),
            "nested"
        );
    }

    #[test]
    fn write_escape_is_rejected() {
        let (_dir, root) = workspace();
        let result = execute_write_file(&root, &write_call("../outside.txt", "nope"));
        assert_eq!(
            result.error().unwrap().kind,
            ToolErrorKind::ConfinementViolation
        );
        assert_eq!(
            result.model_text(),
            "Error: Cannot write to \"../outside.txt\" as it is outside the permitted working directory"
        );
    }
}
