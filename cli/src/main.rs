//! CLI entrypoint for sandpiper
//!
//! Wires the layers together: configuration and credential loading, the
//! sandboxed tool executor, the Gemini gateway, and the instruction loop.

mod cli;
mod progress;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use sandpiper_application::{
    ExecutionParams, RunInstructionError, RunInstructionInput, RunInstructionUseCase,
};
use sandpiper_domain::WorkspaceRoot;
use sandpiper_infrastructure::{
    API_KEY_ENV, ConfigLoader, GeminiGateway, JsonSchemaToolConverter, SandboxedToolExecutor,
    ToolLimits,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let filter = if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ConfigLoader::load()
        .map_err(|e| anyhow!("failed to load configuration: {}", e))?;

    let gateway = GeminiGateway::from_env()
        .map_err(|e| anyhow!("{} (set the {} environment variable)", e, API_KEY_ENV))?;

    // Establish the sandbox root once; every tool operation is confined to it.
    let root_path = PathBuf::from(&config.workspace.root);
    fs::create_dir_all(&root_path)
        .with_context(|| format!("failed to create sandbox directory {}", root_path.display()))?;
    let root_path = root_path
        .canonicalize()
        .with_context(|| format!("failed to resolve sandbox directory {}", root_path.display()))?;
    let root = WorkspaceRoot::new(root_path)?;

    info!(root = %root, model = %config.model.name, "Starting sandpiper");

    let executor = SandboxedToolExecutor::new(root).with_limits(ToolLimits {
        max_read_chars: config.limits.max_read_chars,
        script_timeout: Duration::from_secs(config.limits.script_timeout_secs),
    });

    let use_case = RunInstructionUseCase::new(
        Arc::new(gateway),
        Arc::new(executor),
        Arc::new(JsonSchemaToolConverter),
    );

    if args.verbose {
        println!("User prompt: {}", args.instruction);
    }

    let input = RunInstructionInput::new(&args.instruction, &config.model.name).with_execution(
        ExecutionParams::default().with_max_iterations(config.limits.max_iterations),
    );
    let console = progress::ConsoleProgress::new(args.verbose);

    match use_case.execute(input, &console).await {
        Ok(outcome) => {
            println!("{}", outcome.answer);
            if args.verbose {
                println!("Prompt tokens: {}", outcome.usage.prompt_tokens);
                println!("Response tokens: {}", outcome.usage.response_tokens);
            }
        }
        Err(e @ RunInstructionError::IterationLimitExceeded(_)) => {
            println!("{}", e);
        }
        Err(e @ RunInstructionError::EmptyResponse) => {
            println!("{}", e);
        }
        Err(RunInstructionError::Gateway(e)) => {
            return Err(anyhow!("Error during generation: {}", e));
        }
    }

    Ok(())
}
