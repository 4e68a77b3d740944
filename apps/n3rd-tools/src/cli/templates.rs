//! `templates`: consolidate trivia template batch files into one Dart file.

use crate::console::Console;
use crate::error::{IoContext, Result};
use crate::fsutil::ensure_dir;
use clap::Args;
use n3rd_tools_core::templates::is_batch_file;
use n3rd_tools_core::{TemplateCatalog, TemplateExtractor, render_dart};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Args)]
pub struct TemplatesOptions {
    /// Folder with the Untitled-* batch files
    #[arg(long, default_value = "lib/data/batch_files")]
    pub batch_dir: PathBuf,

    /// Generated Dart file
    #[arg(long, default_value = "lib/data/trivia_templates_consolidated.dart")]
    pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplatesReport {
    pub files: Vec<PathBuf>,
    pub template_count: usize,
    pub theme_count: usize,
    pub output: PathBuf,
}

/// Batch files in `dir`, sorted by path. A missing directory has none.
pub fn discover_batch_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %dir.display(), "batch directory not found");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).io_context(|| format!("read batch directory {}", dir.display()));
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.io_context(|| format!("read batch directory {}", dir.display()))?;
        let name = entry.file_name();
        let path = entry.path();
        if is_batch_file(&name.to_string_lossy()) && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Scrape every batch file and write the consolidated Dart source.
pub fn cmd_templates(opts: &TemplatesOptions, console: &Console) -> Result<TemplatesReport> {
    let extractor = TemplateExtractor::new()?;
    let files = discover_batch_files(&opts.batch_dir)?;

    let mut catalog = TemplateCatalog::new();
    for path in &files {
        let bytes = fs::read(path).io_context(|| format!("read {}", path.display()))?;
        let templates = extractor.extract(&String::from_utf8_lossy(&bytes));
        tracing::debug!(path = %path.display(), count = templates.len(), "extracted templates");
        catalog.add_all(templates);
    }

    if let Some(parent) = opts.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(&opts.output, render_dart(&catalog))
        .io_context(|| format!("write {}", opts.output.display()))?;

    let template_count = catalog.template_count();
    let theme_count = catalog.theme_count();

    console.line(format_args!(
        "Generated {} with {template_count} templates across {theme_count} themes",
        opts.output.display()
    ));
    console.blank();
    console.line("Consolidation complete!");
    console.line(format_args!("Total templates: {template_count}"));
    console.line(format_args!("Total themes: {theme_count}"));

    Ok(TemplatesReport {
        files,
        template_count,
        theme_count,
        output: opts.output.clone(),
    })
}
