//! # n3rd-tools-core
//!
//! The deterministic half of the asset-pipeline tools.
//!
//! Everything in this crate is a pure transformation: canvas geometry,
//! ffmpeg filter graphs and argument lists, ffprobe output parsing, the
//! cleanup plan, the animation mapping table, template extraction and Dart
//! code generation.
//!
//! Note: File I/O and process execution remain in the app layer (apps/n3rd-tools).
//! External processes are described here as [`CommandSpec`] values only.

pub mod canvas;
pub mod cleanup;
pub mod codegen;
pub mod command;
pub mod encode;
pub mod error;
pub mod organize;
pub mod probe;
pub mod size;
pub mod templates;

pub use canvas::{Dimensions, FitPlan, PaddingMode, VARIANTS, Variant, filter_graph, plan_fit};
pub use cleanup::{CleanupPlan, RemovalTarget, wildcard_match};
pub use codegen::{EDITION_THEMES, render_dart};
pub use command::CommandSpec;
pub use encode::EncodeSettings;
pub use error::{Result, ToolError};
pub use organize::AnimationMapping;
pub use probe::{RgbColor, StreamInfo};
pub use templates::{TemplateCatalog, TemplateExtractor, TriviaTemplate};
