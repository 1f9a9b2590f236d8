//! Configuration loading

mod file_config;
mod loader;

pub use file_config::{FileConfig, LimitsConfig, ModelConfig, WorkspaceConfig};
pub use loader::ConfigLoader;
