//! `clean`: stop build processes, run the toolchain clean and delete caches.

use super::home_path;
use crate::console::Console;
use crate::error::Result;
use crate::runner::ProcessRunner;
use clap::Args;
use n3rd_tools_core::cleanup::{
    DERIVED_DATA_RELATIVE, PlannedCommand, df_args, du_args, parse_df_summary, parse_du_size,
};
use n3rd_tools_core::{CleanupPlan, RemovalTarget, wildcard_match};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Args)]
pub struct CleanOptions {
    /// Flutter project root [default: current directory]
    #[arg(long, env = "N3RD_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Xcode DerivedData directory [default: ~/Library/Developer/Xcode/DerivedData]
    #[arg(long, env = "N3RD_DERIVED_DATA")]
    pub derived_data: Option<PathBuf>,

    /// Directory holding flutter_tools.* and *xcresult* leftovers [default: system temp dir]
    #[arg(long, env = "N3RD_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,
}

// =============================================================================
// REPORT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandOutcome {
    Completed,
    /// Non-zero exit (`pkill` with nothing to kill lands here).
    CompletedWithWarnings { code: Option<i32> },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    pub description: String,
    pub outcome: CommandOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemovalOutcome {
    /// `size` is the `du -sh` figure, absent for temp leftovers.
    Removed { size: Option<String> },
    NotFound,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RemovalResult {
    pub label: String,
    pub path: PathBuf,
    pub outcome: RemovalOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanReport {
    pub project_root: PathBuf,
    pub commands: Vec<CommandResult>,
    pub removals: Vec<RemovalResult>,
    pub disk_summary: Option<String>,
}

impl CleanReport {
    /// Removals that actually deleted something.
    pub fn removed(&self) -> impl Iterator<Item = &RemovalResult> {
        self.removals
            .iter()
            .filter(|r| matches!(r.outcome, RemovalOutcome::Removed { .. }))
    }

    /// Steps that could not be carried out.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        let commands = self
            .commands
            .iter()
            .filter(|c| matches!(c.outcome, CommandOutcome::Failed { .. }))
            .count();
        let removals = self
            .removals
            .iter()
            .filter(|r| matches!(r.outcome, RemovalOutcome::Failed { .. }))
            .count();
        commands + removals
    }
}

// =============================================================================
// COMMAND
// =============================================================================

/// Run the five cleanup steps. Individual failures are reported and skipped.
pub fn cmd_clean(
    opts: &CleanOptions,
    runner: &dyn ProcessRunner,
    console: &Console,
) -> Result<CleanReport> {
    let project_root = match &opts.project_root {
        Some(root) => root.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let derived_data = match &opts.derived_data {
        Some(dir) => dir.clone(),
        None => home_path(DERIVED_DATA_RELATIVE, "--derived-data")?,
    };
    let temp_dir = opts.temp_dir.clone().unwrap_or_else(std::env::temp_dir);

    let plan = CleanupPlan::for_project(&project_root, &derived_data, &temp_dir);
    tracing::debug!(?plan, "cleanup plan");

    let mut report = CleanReport {
        project_root: project_root.clone(),
        ..CleanReport::default()
    };

    console.line("🧹 Cleaning old builds...");
    console.blank();

    console.line("1. Stopping running processes...");
    for step in &plan.stop_processes {
        report.commands.push(run_step(runner, console, step));
    }
    console.blank();

    console.line("2. Running flutter clean...");
    report
        .commands
        .push(run_step(runner, console, &plan.toolchain_clean));
    console.blank();

    console.line("3. Removing build directories...");
    for target in &plan.build_paths {
        report.removals.push(remove_target(runner, console, target));
    }

    console.blank();
    console.line("4. Removing Xcode artifacts...");
    if plan.derived_data.is_dir() {
        match sorted_entries(&plan.derived_data) {
            Ok(names) => {
                for name in names {
                    let target = plan.derived_data_entry(&name);
                    report.removals.push(remove_target(runner, console, &target));
                }
            }
            Err(e) => {
                tracing::warn!(path = %plan.derived_data.display(), error = %e, "cannot list DerivedData");
                console.fail(format_args!("Failed to read Xcode DerivedData: {e}"));
            }
        }
    } else {
        console.info("Xcode DerivedData not found");
    }

    console.blank();
    console.line("5. Cleaning temporary files...");
    report
        .removals
        .extend(clean_temp_artifacts(&plan, console));

    console.blank();
    console.line("✅ Cleanup complete!");
    console.blank();
    console.line("📊 Current disk space:");
    report.disk_summary = disk_summary(runner);
    if let Some(summary) = &report.disk_summary {
        console.line(summary);
    }
    console.blank();

    Ok(report)
}

fn run_step(runner: &dyn ProcessRunner, console: &Console, step: &PlannedCommand) -> CommandResult {
    console.line(format_args!("{}...", step.description));

    let outcome = match runner.run(&step.command) {
        Ok(output) if output.success => {
            console.ok(format_args!("{} completed", step.description));
            CommandOutcome::Completed
        }
        Ok(output) => {
            console.warn(format_args!(
                "{} completed (may have warnings)",
                step.description
            ));
            CommandOutcome::CompletedWithWarnings { code: output.code }
        }
        Err(e) => {
            tracing::warn!(command = %step.command, error = %e, "could not run command");
            console.fail(format_args!("{} failed: {e}", step.description));
            CommandOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    CommandResult {
        description: step.description.clone(),
        outcome,
    }
}

fn remove_target(
    runner: &dyn ProcessRunner,
    console: &Console,
    target: &RemovalTarget,
) -> RemovalResult {
    let outcome = match fs::symlink_metadata(&target.path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            console.info(format_args!("{} not found (already clean)", target.label));
            RemovalOutcome::NotFound
        }
        Err(e) => {
            console.fail(format_args!("Failed to remove {}: {e}", target.label));
            RemovalOutcome::Failed {
                error: e.to_string(),
            }
        }
        Ok(_) => {
            let size = disk_usage(runner, &target.path);
            match remove_path(&target.path) {
                Ok(()) => {
                    tracing::debug!(path = %target.path.display(), %size, "removed");
                    console.ok(format_args!("Removed {} ({size})", target.label));
                    RemovalOutcome::Removed { size: Some(size) }
                }
                Err(e) => {
                    tracing::warn!(path = %target.path.display(), error = %e, "removal failed");
                    console.fail(format_args!("Failed to remove {}: {e}", target.label));
                    RemovalOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            }
        }
    };

    RemovalResult {
        label: target.label.clone(),
        path: target.path.clone(),
        outcome,
    }
}

/// Remove temp-dir entries matching the plan's patterns, one line per pattern.
fn clean_temp_artifacts(plan: &CleanupPlan, console: &Console) -> Vec<RemovalResult> {
    let names = match sorted_entries(&plan.temp_dir) {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!(path = %plan.temp_dir.display(), error = %e, "cannot list temp dir");
            console.fail(format_args!(
                "Cleaning {} failed: {e}",
                plan.temp_dir.display()
            ));
            return Vec::new();
        }
    };

    let mut handled = BTreeSet::new();
    let mut results = Vec::new();
    for pattern in &plan.temp_patterns {
        let shown = plan.temp_dir.join(pattern);
        console.line(format_args!("Cleaned {}...", shown.display()));

        let matching: Vec<&String> = names
            .iter()
            .filter(|name| wildcard_match(pattern, name) && handled.insert((*name).clone()))
            .collect();

        let mut removed_count = 0usize;
        for name in matching {
            let path = plan.temp_dir.join(name);
            let outcome = match remove_path(&path) {
                Ok(()) => {
                    removed_count += 1;
                    RemovalOutcome::Removed { size: None }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "removal failed");
                    console.fail(format_args!("Failed to remove {name}: {e}"));
                    RemovalOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            results.push(RemovalResult {
                label: name.clone(),
                path,
                outcome,
            });
        }
        console.ok(format_args!(
            "Cleaned {} completed ({removed_count} removed)",
            shown.display()
        ));
    }
    results
}

fn remove_path(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

fn sorted_entries(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    Ok(names)
}

fn disk_usage(runner: &dyn ProcessRunner, path: &Path) -> String {
    runner
        .run(&du_args(path))
        .ok()
        .filter(|out| out.success)
        .and_then(|out| parse_du_size(&out.stdout))
        .unwrap_or_else(|| String::from("unknown size"))
}

fn disk_summary(runner: &dyn ProcessRunner) -> Option<String> {
    runner
        .run(&df_args())
        .ok()
        .filter(|out| out.success)
        .and_then(|out| parse_df_summary(&out.stdout))
}
