//! `organize`: sort exported animation clips into per-screen folders.

use crate::console::Console;
use crate::error::{IoContext, Result};
use crate::fsutil::{copy_preserving_mtime, ensure_dir};
use clap::Args;
use n3rd_tools_core::AnimationMapping;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct OrganizeOptions {
    /// Folder holding the exported clips
    #[arg(
        long,
        default_value = "assets/animations/Green Neutral Simple Serendipity Phone Wallpaper(1)"
    )]
    pub source_dir: PathBuf,

    /// Folder the category folders are created in
    #[arg(long, default_value = "assets/animations")]
    pub dest_base: PathBuf,

    /// JSON object of "file name": "category" pairs [default: built-in table]
    #[arg(long)]
    pub mapping: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopiedFile {
    pub file_name: String,
    pub category: String,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizeReport {
    pub copied: Vec<CopiedFile>,
    pub missing: Vec<String>,
}

/// Create every category folder, then copy each mapped file that exists.
pub fn cmd_organize(opts: &OrganizeOptions, console: &Console) -> Result<OrganizeReport> {
    let mapping = match &opts.mapping {
        Some(path) => {
            let text = fs::read_to_string(path)
                .io_context(|| format!("read mapping {}", path.display()))?;
            AnimationMapping::from_json(&text)?
        }
        None => AnimationMapping::default(),
    };
    tracing::debug!(entries = mapping.len(), "animation mapping loaded");
    if mapping.is_empty() {
        tracing::warn!("animation mapping has no entries");
    }

    console.line("Organizing animation files...");
    console.blank();

    for category in mapping.categories() {
        ensure_dir(&opts.dest_base.join(category))?;
    }

    let mut report = OrganizeReport::default();
    for entry in mapping.entries() {
        let src = opts.source_dir.join(&entry.file_name);
        let dest = opts.dest_base.join(&entry.category).join(&entry.file_name);

        if src.is_file() {
            copy_preserving_mtime(&src, &dest)?;
            console.line(format_args!("✓ {} → {}/", entry.file_name, entry.category));
            report.copied.push(CopiedFile {
                file_name: entry.file_name.clone(),
                category: entry.category.clone(),
                destination: dest,
            });
        } else {
            tracing::debug!(path = %src.display(), "animation not found");
            console.line(format_args!("⚠ {} not found", entry.file_name));
            report.missing.push(entry.file_name.clone());
        }
    }

    console.blank();
    console.line(format_args!(
        "✅ Organized {} files successfully!",
        report.copied.len()
    ));
    console.line(format_args!(
        "📁 Files are now in: {}/[category]/",
        opts.dest_base.display()
    ));

    Ok(report)
}
