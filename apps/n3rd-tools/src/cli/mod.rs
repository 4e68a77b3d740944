//! # CLI Module
//!
//! Command line definition and dispatch.
//!
//! Each subcommand lives in its own module and exposes a `cmd_*` function
//! that takes its options, the console and (where external tools are
//! involved) a [`ProcessRunner`], and returns a serializable report.

mod clean;
mod copy_bg;
mod organize;
mod templates;
mod videos;

pub use clean::{
    CleanOptions, CleanReport, CommandOutcome, CommandResult, RemovalOutcome, RemovalResult,
    cmd_clean,
};
pub use copy_bg::{BG_FILE_NAME, CopyBgOptions, CopyReport, cmd_copy_bg};
pub use organize::{CopiedFile, OrganizeOptions, OrganizeReport, cmd_organize};
pub use templates::{TemplatesOptions, TemplatesReport, cmd_templates, discover_batch_files};
pub use videos::{VariantResult, VideosOptions, VideosReport, cmd_videos, detect_dominant_color};

use crate::console::Console;
use crate::error::{AppError, Result};
use crate::runner::{ProcessRunner, SystemRunner};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// ARGUMENTS
// =============================================================================

/// Asset pipeline and build hygiene tools.
#[derive(Debug, Parser)]
#[command(name = "n3rd-tools", version, about)]
pub struct Cli {
    /// Print a JSON report on stdout instead of progress text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug diagnostics to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Stop build processes, run flutter clean and delete build caches.
    Clean(CleanOptions),
    /// Copy the game-screen background image into the asset tree.
    CopyBg(CopyBgOptions),
    /// Generate standard / tall / extra_tall video wallpapers with ffmpeg.
    Videos(VideosOptions),
    /// Copy animation files into category folders.
    Organize(OrganizeOptions),
    /// Consolidate trivia template batch files into one Dart source file.
    Templates(TemplatesOptions),
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run the selected subcommand with the system process runner.
pub fn run(cli: &Cli) -> Result<()> {
    run_with(cli, &SystemRunner)
}

/// Run the selected subcommand with `runner`.
pub fn run_with(cli: &Cli, runner: &dyn ProcessRunner) -> Result<()> {
    let console = Console::new(cli.json);

    match &cli.command {
        Commands::Clean(opts) => emit(cli.json, &cmd_clean(opts, runner, &console)?),
        Commands::CopyBg(opts) => emit(cli.json, &cmd_copy_bg(opts, &console)?),
        Commands::Videos(opts) => emit(cli.json, &cmd_videos(opts, runner, &console)?),
        Commands::Organize(opts) => emit(cli.json, &cmd_organize(opts, &console)?),
        Commands::Templates(opts) => emit(cli.json, &cmd_templates(opts, &console)?),
    }
}

fn emit<T: Serialize>(json: bool, report: &T) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    }
    Ok(())
}

/// `~/<relative>`, for defaults that live under the home directory.
pub(crate) fn home_path(relative: &str, flag: &'static str) -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(relative))
        .ok_or(AppError::NoHomeDir(flag))
}
