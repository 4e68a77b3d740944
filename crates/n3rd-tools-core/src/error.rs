//! # Error Module
//!
//! Errors raised by the pure tool logic.

use thiserror::Error;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Errors from the core tool logic.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A frame dimension was zero.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// ffprobe printed something other than the requested fields.
    #[error("unrecognised ffprobe output: {0:?}")]
    ProbeOutput(String),

    /// Padding mode name not one of blur, solid, mirror, black.
    #[error("unknown padding mode '{0}' (expected blur, solid, mirror or black)")]
    UnknownPaddingMode(String),

    /// Animation mapping file was not a flat object of file names to categories.
    #[error("invalid animation mapping: {0}")]
    Mapping(String),

    /// The template pattern failed to compile.
    #[error("template pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, ToolError>;
