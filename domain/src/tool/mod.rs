//! Tool domain model
//!
//! - [`entities`] — definitions, the catalog, and model-issued calls
//! - [`traits`] — call validation against a definition
//! - [`value_objects`] — results and the typed error taxonomy

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolErrorKind, ToolResult, ToolResultMetadata};
