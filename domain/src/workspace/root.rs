//! The workspace root value object.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::guard::{self, ConfinementError};

/// Errors establishing a workspace root.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The root must be absolute so containment checks are meaningful.
    #[error("workspace root must be an absolute path, got \"{0}\"")]
    NotAbsolute(String),
}

/// The single directory all tool operations are confined to.
///
/// Established once at startup from an absolute, normalized path (the caller
/// canonicalizes before construction) and immutable for the process
/// lifetime. Tool operations never receive raw model-supplied paths — they
/// go through [`resolve`](Self::resolve) first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot(PathBuf);

impl WorkspaceRoot {
    /// Create a root from an absolute path.
    ///
    /// Dot segments are collapsed so the stored boundary is in normal form.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, WorkspaceError> {
        let path = path.into();
        if !path.is_absolute() {
            return Err(WorkspaceError::NotAbsolute(path.display().to_string()));
        }
        Ok(Self(guard::normalize_dot_segments(&path)))
    }

    /// The root directory path.
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Resolve a model-supplied relative path inside this root.
    ///
    /// Returns the absolute, normalized target path, or a
    /// [`ConfinementError`] if the path escapes the root.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, ConfinementError> {
        guard::resolve_confined(&self.0, relative)
    }
}

impl std::fmt::Display for WorkspaceRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
