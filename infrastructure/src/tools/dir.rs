//! Directory listing tool: list_directory

use sandpiper_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use sandpiper_domain::workspace::WorkspaceRoot;
use std::fs;
use std::time::Instant;

/// Tool name constant
pub const LIST_DIRECTORY: &str = "list_directory";

/// Get the tool definition for list_directory
pub fn list_directory_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_DIRECTORY,
        "List the immediate entries of a directory inside the working directory, with sizes",
    )
    .with_parameter(ToolParameter::new(
        "directory",
        "Directory to list, relative to the working directory (defaults to the working directory itself)",
        false,
    ))
}

/// Execute the list_directory tool
pub fn execute_list_directory(root: &WorkspaceRoot, call: &ToolCall) -> ToolResult {
    let start = Instant::now();
    let directory = call.get_string("directory").unwrap_or(".");

    let resolved = match root.resolve(directory) {
        Ok(p) => p,
        Err(_) => {
            return ToolResult::failure(
                LIST_DIRECTORY,
                ToolError::confinement(format!(
                    "Cannot list \"{}\" as it is outside the permitted working directory",
                    directory
                )),
            );
        }
    };

    if !resolved.exists() {
        return ToolResult::failure(
            LIST_DIRECTORY,
            ToolError::not_found(format!("\"{}\" does not exist", directory)),
        );
    }
    if !resolved.is_dir() {
        return ToolResult::failure(
            LIST_DIRECTORY,
            ToolError::not_a_directory(format!("\"{}\" is not a directory", directory)),
        );
    }

    let entries = match fs::read_dir(&resolved) {
        Ok(iter) => iter,
        Err(e) => {
            return ToolResult::failure(
                LIST_DIRECTORY,
                ToolError::io(format!("Failed to list \"{}\": {}", directory, e)),
            );
        }
    };

    let mut lines = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                return ToolResult::failure(
                    LIST_DIRECTORY,
                    ToolError::io(format!("Failed to list \"{}\": {}", directory, e)),
                );
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                return ToolResult::failure(
                    LIST_DIRECTORY,
                    ToolError::io(format!("Failed to stat \"{}\": {}", name, e)),
                );
            }
        };
        lines.push(format!(
            "- {}: file_size={} bytes, is_dir={}",
            name,
            metadata.len(),
            metadata.is_dir()
        ));
    }

    // Lexicographic order keeps the output reproducible run to run.
    lines.sort();

    let output = lines.join("\n");
    let duration_ms = start.elapsed().as_millis() as u64;

    ToolResult::success(LIST_DIRECTORY, output).with_metadata(ToolResultMetadata {
        duration_ms: Some(duration_ms),
        path: Some(directory.to_string()),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandpiper_domain::ToolErrorKind;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn workspace() -> (tempfile::TempDir, WorkspaceRoot) {
        let dir = tempdir().unwrap();
        let root = WorkspaceRoot::new(dir.path().canonicalize().unwrap()).unwrap();
        (dir, root)
    }

    #[test]
    fn lists_entries_in_lexicographic_order() {
        let (dir, root) = workspace();
        let mut f = File::create(dir.path().join("b.txt")).unwrap();
        f.write_all(b"hello").unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();

        let result = execute_list_directory(&root, &ToolCall::new(LIST_DIRECTORY));

        assert!(result.is_success());
        let output = result.output().unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("- a:"));
        assert!(lines[0].ends_with("is_dir=true"));
        assert!(lines[1].starts_with("- b.txt:"));
        assert!(lines[1].contains("file_size=5 bytes"));
        assert!(lines[1].ends_with("is_dir=false"));
    }

    #[test]
    fn listing_twice_is_identical() {
        let (dir, root) = workspace();
        File::create(dir.path().join("x.txt")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let first = execute_list_directory(&root, &ToolCall::new(LIST_DIRECTORY));
        let second = execute_list_directory(&root, &ToolCall::new(LIST_DIRECTORY));
        assert_eq!(first.output(), second.output());
    }

    #[test]
    fn lists_subdirectory_via_argument() {
        let (dir, root) = workspace();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub/inner.txt")).unwrap();

        let call = ToolCall::new(LIST_DIRECTORY).with_arg("directory", "sub");
        let result = execute_list_directory(&root, &call);

        assert!(result.is_success());
        assert!(result.output().unwrap().contains("- inner.txt:"));
    }

    #[test]
    fn missing_directory_is_distinct_from_not_a_directory() {
        let (dir, root) = workspace();
        File::create(dir.path().join("plain.txt")).unwrap();

        let missing = execute_list_directory(
            &root,
            &ToolCall::new(LIST_DIRECTORY).with_arg("directory", "nope"),
        );
        assert_eq!(missing.error().unwrap().kind, ToolErrorKind::NotFound);
        assert_eq!(missing.model_text(), "Error: \"nope\" does not exist");

        let not_dir = execute_list_directory(
            &root,
            &ToolCall::new(LIST_DIRECTORY).with_arg("directory", "plain.txt"),
        );
        assert_eq!(not_dir.error().unwrap().kind, ToolErrorKind::NotADirectory);
        assert_eq!(not_dir.model_text(), "Error: \"plain.txt\" is not a directory");
    }

    #[test]
    fn escape_is_rejected_with_the_confinement_message() {
        let (_dir, root) = workspace();
        let call = ToolCall::new(LIST_DIRECTORY).with_arg("directory", "../elsewhere");
        let result = execute_list_directory(&root, &call);

        assert_eq!(
            result.error().unwrap().kind,
            ToolErrorKind::ConfinementViolation
        );
        assert_eq!(
            result.model_text(),
            "Error: Cannot list \"../elsewhere\" as it is outside the permitted working directory"
        );
    }

    #[test]
    fn empty_directory_yields_empty_output() {
        let (_dir, root) = workspace();
        let result = execute_list_directory(&root, &ToolCall::new(LIST_DIRECTORY));
        assert!(result.is_success());
        assert_eq!(result.output(), Some(""));
    }
}
