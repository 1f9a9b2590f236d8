//! Script execution tool: run_script
//!
//! The only tool with an external-process boundary. The child runs with the
//! workspace root as its working directory and is bounded by a wall-clock
//! timeout; on expiry it is killed and reaped, never abandoned.
//!
//! Script arguments are forwarded to the interpreter verbatim — only the
//! script path itself is confined to the workspace.

use sandpiper_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use sandpiper_domain::workspace::WorkspaceRoot;
use std::io::Read;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

/// Tool name constant
pub const RUN_SCRIPT: &str = "run_script";

/// Interpreter used for script execution.
const INTERPRETER: &str = "python3";

/// Required script file extension.
const SCRIPT_EXTENSION: &str = "py";

/// Get the tool definition for run_script
pub fn run_script_definition() -> ToolDefinition {
    ToolDefinition::new(
        RUN_SCRIPT,
        "Execute a Python file inside the working directory with optional arguments, capturing its output",
    )
    .with_parameter(ToolParameter::new(
        "file_path",
        "Path to the Python file, relative to the working directory",
        true,
    ))
    .with_parameter(
        ToolParameter::new("args", "Arguments to pass to the script", false)
            .with_type("string_array"),
    )
}

/// Execute the run_script tool
pub fn execute_run_script(root: &WorkspaceRoot, call: &ToolCall, timeout: Duration) -> ToolResult {
    let start = Instant::now();

    let file_path = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(RUN_SCRIPT, ToolError::invalid_argument(e)),
    };

    let resolved = match root.resolve(file_path) {
        Ok(p) => p,
        Err(_) => {
            return ToolResult::failure(
                RUN_SCRIPT,
                ToolError::confinement(format!(
                    "Cannot execute \"{}\" as it is outside the permitted working directory",
                    file_path
                )),
            );
        }
    };

    if !resolved.is_file() {
        return ToolResult::failure(
            RUN_SCRIPT,
            ToolError::not_found(format!("File \"{}\" not found.", file_path)),
        );
    }
    if resolved.extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXTENSION) {
        return ToolResult::failure(
            RUN_SCRIPT,
            ToolError::extension_mismatch(format!("\"{}\" is not a Python file.", file_path)),
        );
    }

    let args = call.get_string_array("args");

    let mut cmd = Command::new(INTERPRETER);
    cmd.arg(&resolved)
        .args(&args)
        .current_dir(root.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            return ToolResult::failure(
                RUN_SCRIPT,
                ToolError::io(format!("Failed to execute \"{}\": {}", file_path, e)),
            );
        }
    };

    let output = match wait_with_timeout(child, timeout) {
        Ok(o) => o,
        Err(WaitError::Timeout) => {
            return ToolResult::failure(
                RUN_SCRIPT,
                ToolError::timeout(format!(
                    "executing \"{}\": process timed out after {} seconds",
                    file_path,
                    timeout.as_secs()
                )),
            );
        }
        Err(WaitError::Io(message)) => {
            return ToolResult::failure(
                RUN_SCRIPT,
                ToolError::io(format!("Failed to execute \"{}\": {}", file_path, message)),
            );
        }
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    let exit_code = output.status.code().unwrap_or(-1);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let mut sections = Vec::new();
    if !stdout.is_empty() {
        sections.push(format!("STDOUT:\n{}", stdout));
    }
    if !stderr.is_empty() {
        sections.push(format!("STDERR:\n{}", stderr));
    }
    if exit_code != 0 {
        sections.push(format!("Process exited with code {}", exit_code));
    }

    let text = if sections.is_empty() {
        "No output produced.".to_string()
    } else {
        sections.join("\n")
    };

    ToolResult::success(RUN_SCRIPT, text).with_metadata(ToolResultMetadata {
        duration_ms: Some(duration_ms),
        exit_code: Some(exit_code),
        path: Some(file_path.to_string()),
        ..Default::default()
    })
}

enum WaitError {
    Timeout,
    Io(String),
}

/// Wait for a child process, enforcing the wall-clock timeout.
///
/// Stdout and stderr are drained on background threads so a chatty child
/// cannot deadlock on a full pipe. On expiry the child is killed and then
/// waited on, so no zombie survives the call.
fn wait_with_timeout(mut child: Child, timeout: Duration) -> Result<Output, WaitError> {
    let stdout_handle = drain_pipe(child.stdout.take());
    let stderr_handle = drain_pipe(child.stderr.take());

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = stdout_handle.join().unwrap_or_default();
                let stderr = stderr_handle.join().unwrap_or_default();
                return Ok(Output {
                    status,
                    stdout,
                    stderr,
                });
            }
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(WaitError::Timeout);
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(WaitError::Io(format!("failed to wait for process: {}", e)));
            }
        }
    }
}

fn drain_pipe<R: Read + Send + 'static>(
    pipe: Option<R>,
) -> std::thread::JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandpiper_domain::ToolErrorKind;
    use std::fs;
    use tempfile::tempdir;

    const TIMEOUT: Duration = Duration::from_secs(30);

    fn workspace() -> (tempfile::TempDir, WorkspaceRoot) {
        let dir = tempdir().unwrap();
        let root = WorkspaceRoot::new(dir.path().canonicalize().unwrap()).unwrap();
        (dir, root)
    }

    fn script_call(path: &str) -> ToolCall {
        ToolCall::new(RUN_SCRIPT).with_arg("file_path", path)
    }

    #[test]
    fn captures_stdout() {
        let (dir, root) = workspace();
        fs::write(dir.path().join("hello.py"), "print('hello from script')").unwrap();

        let result = execute_run_script(&root, &script_call("hello.py"), TIMEOUT);
        assert!(result.is_success());
        assert_eq!(result.output(), Some("STDOUT:\nhello from script\n"));
        assert_eq!(result.metadata.exit_code, Some(0));
    }

    #[test]
    fn forwards_arguments_in_order() {
        let (dir, root) = workspace();
        fs::write(
            dir.path().join("echo.py"),
            "import sys\nprint(' '.join(sys.argv[1:]))",
        )
        .unwrap();

        let call = script_call("echo.py").with_arg("args", serde_json::json!(["one", "two"]));
        let result = execute_run_script(&root, &call, TIMEOUT);
        assert!(result.output().unwrap().contains("one two"));
    }

    #[test]
    fn runs_with_workspace_root_as_cwd() {
        let (dir, root) = workspace();
        fs::write(dir.path().join("cwd.py"), "import os\nprint(os.getcwd())").unwrap();

        let result = execute_run_script(&root, &script_call("cwd.py"), TIMEOUT);
        assert!(result.output().unwrap().contains(root.path().to_str().unwrap()));
    }

    #[test]
    fn nonzero_exit_without_output_yields_exit_code_line_only() {
        let (dir, root) = workspace();
        fs::write(dir.path().join("fail.py"), "import sys\nsys.exit(2)").unwrap();

        let result = execute_run_script(&root, &script_call("fail.py"), TIMEOUT);
        assert!(result.is_success());
        assert_eq!(result.output(), Some("Process exited with code 2"));
        assert_eq!(result.metadata.exit_code, Some(2));
    }

    #[test]
    fn silent_success_reports_no_output() {
        let (dir, root) = workspace();
        fs::write(dir.path().join("quiet.py"), "pass").unwrap();

        let result = execute_run_script(&root, &script_call("quiet.py"), TIMEOUT);
        assert_eq!(result.output(), Some("No output produced."));
    }

    #[test]
    fn timeout_kills_the_child_and_returns_promptly() {
        let (dir, root) = workspace();
        fs::write(
            dir.path().join("sleepy.py"),
            "import time\ntime.sleep(30)\nprint('never')",
        )
        .unwrap();

        let start = Instant::now();
        let result = execute_run_script(&root, &script_call("sleepy.py"), Duration::from_secs(1));

        // Well under the script's sleep: the child was killed and reaped,
        // not waited out or abandoned.
        assert!(start.elapsed() < Duration::from_secs(10));
        let error = result.error().unwrap();
        assert_eq!(error.kind, ToolErrorKind::ExecutionTimeout);
        assert_eq!(
            result.model_text(),
            "Error: executing \"sleepy.py\": process timed out after 1 seconds"
        );
    }

    #[test]
    fn missing_script_reports_not_found() {
        let (_dir, root) = workspace();
        let result = execute_run_script(&root, &script_call("ghost.py"), TIMEOUT);
        assert_eq!(result.error().unwrap().kind, ToolErrorKind::NotFound);
        assert_eq!(result.model_text(), "Error: File \"ghost.py\" not found.");
    }

    #[test]
    fn non_python_extension_is_rejected() {
        let (dir, root) = workspace();
        fs::write(dir.path().join("script.sh"), "echo hi").unwrap();

        let result = execute_run_script(&root, &script_call("script.sh"), TIMEOUT);
        assert_eq!(
            result.error().unwrap().kind,
            ToolErrorKind::ExtensionMismatch
        );
        assert_eq!(
            result.model_text(),
            "Error: \"script.sh\" is not a Python file."
        );
    }

    #[test]
    fn escape_is_rejected_before_any_execution() {
        let (_dir, root) = workspace();
        let result = execute_run_script(&root, &script_call("../evil.py"), TIMEOUT);
        assert_eq!(
            result.error().unwrap().kind,
            ToolErrorKind::ConfinementViolation
        );
        assert_eq!(
            result.model_text(),
            "Error: Cannot execute \"../evil.py\" as it is outside the permitted working directory"
        );
    }
}
