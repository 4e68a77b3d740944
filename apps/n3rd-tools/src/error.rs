//! # Error Module
//!
//! Fatal errors of the CLI layer. Anything that reaches `main` ends the
//! process with exit code 1; per-step failures are reported inline instead.

use n3rd_tools_core::ToolError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a subcommand.
#[derive(Debug, Error)]
pub enum AppError {
    /// The file to copy does not exist.
    #[error("Source file not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// The file to process does not exist.
    #[error("Input file '{}' not found.", .0.display())]
    InputMissing(PathBuf),

    /// A required external tool is not on `PATH`.
    #[error("{tool} is not installed. {hint}")]
    MissingTool {
        tool: &'static str,
        hint: &'static str,
    },

    /// No home directory to derive a default path from.
    #[error("cannot determine home directory; pass {0} explicitly")]
    NoHomeDir(&'static str),

    /// Filesystem operation failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// JSON report serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core logic rejected its input.
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach a description to an `io::Error`.
pub trait IoContext<T> {
    fn io_context(self, context: impl FnOnce() -> String) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context(self, context: impl FnOnce() -> String) -> Result<T> {
        self.map_err(|source| AppError::Io {
            context: context(),
            source,
        })
    }
}
