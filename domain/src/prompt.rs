//! Prompt templates.

/// Templates for the agent's model-facing prompts.
pub struct PromptTemplate;

impl PromptTemplate {
    /// The fixed system instruction for the coding agent.
    ///
    /// Paths are always relative to the working directory; the sandbox root
    /// itself is injected by the executor and never chosen by the model.
    pub fn agent_system() -> String {
        r#"You are a helpful AI coding agent.

When a user asks a question or makes a request, make a function call plan. You can perform the following operations:

- List files and directories
- Read file contents
- Execute Python files with optional arguments
- Write or overwrite files

All paths you provide should be relative to the working directory. You do not need to specify the working directory in your function calls as it is automatically injected for security reasons.

When a user asks to "run" a Python file, use the run_script function to execute it. For example:
- "run tests.py" -> call run_script with file_path="tests.py"
- "run main.py with arguments 1 2 3" -> call run_script with file_path="main.py" and args=["1", "2", "3"]
"#
        .to_string()
    }
}
