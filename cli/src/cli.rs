//! Command-line interface definition.

use clap::Parser;

/// Sandboxed agentic CLI assistant.
///
/// Sends the instruction to the model and lets it work inside the configured
/// sandbox directory until it produces an answer.
#[derive(Parser, Debug)]
#[command(name = "sandpiper", version, about)]
pub struct Cli {
    /// The instruction to carry out
    pub instruction: String,

    /// Echo the instruction, dump per-call arguments and results, and print
    /// token usage counters
    #[arg(long)]
    pub verbose: bool,
}
