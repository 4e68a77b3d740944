//! `copy-bg`: drop the exported game-screen background into the asset tree.

use super::home_path;
use crate::console::Console;
use crate::error::{AppError, Result};
use crate::fsutil::{copy_preserving_mtime, ensure_dir};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Stable asset name the game loads the background from.
pub const BG_FILE_NAME: &str = "game_screen_bg.png";

/// Where the design export lands, relative to the home directory.
const DEFAULT_SOURCE: &str = "Downloads/game screen123.png";

#[derive(Debug, Clone, Args)]
pub struct CopyBgOptions {
    /// Exported image [default: ~/Downloads/game screen123.png]
    #[arg(long, env = "N3RD_BG_SOURCE")]
    pub source: Option<PathBuf>,

    /// Asset directory to copy into
    #[arg(long, default_value = "assets/images")]
    pub dest_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopyReport {
    pub source: PathBuf,
    /// Copy under the source's own name, then under [`BG_FILE_NAME`].
    pub destinations: Vec<PathBuf>,
}

/// Copy the background image to both destination names.
///
/// Fails with [`AppError::SourceMissing`] when the source is not a file.
pub fn cmd_copy_bg(opts: &CopyBgOptions, console: &Console) -> Result<CopyReport> {
    let source = match &opts.source {
        Some(source) => source.clone(),
        None => home_path(DEFAULT_SOURCE, "--source")?,
    };

    ensure_dir(&opts.dest_dir)?;

    if !source.is_file() {
        tracing::warn!(path = %source.display(), "background source missing");
        return Err(AppError::SourceMissing(source));
    }

    let own_name = source
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(BG_FILE_NAME));
    let primary = opts.dest_dir.join(own_name);
    let alias = opts.dest_dir.join(BG_FILE_NAME);

    copy_preserving_mtime(&source, &primary)?;
    if alias != primary {
        copy_preserving_mtime(&source, &alias)?;
    }

    console.line(format_args!(
        "✅ Copied {} to {}",
        source.display(),
        primary.display()
    ));
    console.line(format_args!("✅ Also copied to {}", alias.display()));

    let mut destinations = vec![primary, alias];
    destinations.dedup();
    Ok(CopyReport {
        source,
        destinations,
    })
}
