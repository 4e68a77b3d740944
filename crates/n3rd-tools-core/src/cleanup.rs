//! # Cleanup Module
//!
//! What the build-artifact cleaner stops, runs and deletes for a project.
//!
//! The plan is pure data; the app layer walks it in order:
//! 1. stop running build processes
//! 2. run the toolchain clean command
//! 3. remove build directories (and the Podfile lock)
//! 4. empty Xcode DerivedData (the directory itself is kept)
//! 5. remove toolchain temp files matching the temp patterns
//!
//! followed by a free-disk-space summary.

use crate::command::CommandSpec;
use std::path::{Path, PathBuf};

/// Default location of Xcode DerivedData, relative to the home directory.
pub const DERIVED_DATA_RELATIVE: &str = "Library/Developer/Xcode/DerivedData";

/// Temp-directory entries left behind by flutter tooling and xcodebuild.
pub const TEMP_PATTERNS: [&str; 2] = ["flutter_tools.*", "*xcresult*"];

// =============================================================================
// PLAN TYPES
// =============================================================================

/// An external command together with the label shown while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCommand {
    pub description: String,
    pub command: CommandSpec,
}

/// A path to delete, file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalTarget {
    pub path: PathBuf,
    pub label: String,
}

impl RemovalTarget {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

/// The full cleanup sequence for one project.
#[derive(Debug, Clone)]
pub struct CleanupPlan {
    pub project_root: PathBuf,
    pub stop_processes: Vec<PlannedCommand>,
    pub toolchain_clean: PlannedCommand,
    pub build_paths: Vec<RemovalTarget>,
    pub derived_data: PathBuf,
    pub temp_dir: PathBuf,
    pub temp_patterns: Vec<String>,
}

impl CleanupPlan {
    /// Build the plan for a Flutter project at `project_root`.
    #[must_use]
    pub fn for_project(project_root: &Path, derived_data: &Path, temp_dir: &Path) -> Self {
        let stop_processes = vec![
            PlannedCommand {
                description: "Stopped flutter processes".to_string(),
                command: CommandSpec::new("pkill").args(["-f", "flutter run"]),
            },
            PlannedCommand {
                description: "Stopped xcodebuild processes".to_string(),
                command: CommandSpec::new("pkill").args(["-f", "xcodebuild"]),
            },
        ];

        let toolchain_clean = PlannedCommand {
            description: "Flutter clean".to_string(),
            command: CommandSpec::new("flutter")
                .arg("clean")
                .current_dir(project_root),
        };

        let build_paths = vec![
            RemovalTarget::new(project_root.join("build"), "Flutter build directory"),
            RemovalTarget::new(project_root.join("ios").join("Pods"), "iOS Pods"),
            RemovalTarget::new(
                project_root.join("ios").join("Podfile.lock"),
                "Podfile.lock (file)",
            ),
        ];

        Self {
            project_root: project_root.to_path_buf(),
            stop_processes,
            toolchain_clean,
            build_paths,
            derived_data: derived_data.to_path_buf(),
            temp_dir: temp_dir.to_path_buf(),
            temp_patterns: TEMP_PATTERNS.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Removal target for one child of the DerivedData directory.
    #[must_use]
    pub fn derived_data_entry(&self, name: &str) -> RemovalTarget {
        RemovalTarget::new(self.derived_data.join(name), format!("DerivedData/{name}"))
    }

    /// Whether a temp-directory entry name matches any temp pattern.
    #[must_use]
    pub fn is_temp_artifact(&self, name: &str) -> bool {
        self.temp_patterns.iter().any(|p| wildcard_match(p, name))
    }
}

// =============================================================================
// DISK USAGE
// =============================================================================

/// `du -sh PATH`
#[must_use]
pub fn du_args(path: &Path) -> CommandSpec {
    CommandSpec::new("du").arg("-sh").arg(path)
}

/// First whitespace-separated field of `du -sh` output (`"1.2G"`).
#[must_use]
pub fn parse_du_size(stdout: &str) -> Option<String> {
    stdout.split_whitespace().next().map(String::from)
}

/// `df -h /`
#[must_use]
pub fn df_args() -> CommandSpec {
    CommandSpec::new("df").args(["-h", "/"])
}

/// The filesystem row of `df` output; `None` when only a header came back.
#[must_use]
pub fn parse_df_summary(stdout: &str) -> Option<String> {
    let lines: Vec<&str> = stdout.trim().lines().collect();
    if lines.len() > 1 {
        lines.last().map(|l| (*l).to_string())
    } else {
        None
    }
}

// =============================================================================
// WILDCARDS
// =============================================================================

/// Match `name` against a pattern where `*` is any run of characters.
#[must_use]
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();

    let (mut pi, mut ni) = (0, 0);
    let mut star: Option<usize> = None;
    let mut resume = 0;

    while ni < n.len() {
        if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            pi += 1;
            resume = ni;
        } else if pi < p.len() && p[pi] == n[ni] {
            pi += 1;
            ni += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            resume += 1;
            ni = resume;
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|c| *c == '*')
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> CleanupPlan {
        CleanupPlan::for_project(
            Path::new("/work/game"),
            Path::new("/home/dev/Library/Developer/Xcode/DerivedData"),
            Path::new("/tmp"),
        )
    }

    #[test]
    fn plan_orders_build_paths() {
        let plan = plan();
        let paths: Vec<&Path> = plan.build_paths.iter().map(|t| t.path.as_path()).collect();
        assert_eq!(
            paths,
            vec![
                Path::new("/work/game/build"),
                Path::new("/work/game/ios/Pods"),
                Path::new("/work/game/ios/Podfile.lock"),
            ]
        );
    }

    #[test]
    fn toolchain_clean_runs_in_project_root() {
        let plan = plan();
        assert_eq!(plan.toolchain_clean.command.program, "flutter");
        assert_eq!(plan.toolchain_clean.command.args_lossy(), vec!["clean"]);
        assert_eq!(
            plan.toolchain_clean.command.cwd.as_deref(),
            Some(Path::new("/work/game"))
        );
        assert_eq!(plan.stop_processes.len(), 2);
        assert_eq!(
            plan.stop_processes[0].command.args_lossy(),
            vec!["-f", "flutter run"]
        );
    }

    #[test]
    fn derived_data_entries_are_labelled() {
        let entry = plan().derived_data_entry("Runner-abc");
        assert_eq!(entry.label, "DerivedData/Runner-abc");
        assert!(entry.path.ends_with("DerivedData/Runner-abc"));
    }

    #[test]
    fn temp_artifacts_match_patterns() {
        let plan = plan();
        assert!(plan.is_temp_artifact("flutter_tools.AbC123"));
        assert!(plan.is_temp_artifact("Test-Runner.xcresult"));
        assert!(plan.is_temp_artifact("xcresult"));
        assert!(!plan.is_temp_artifact("flutter_tools"));
        assert!(!plan.is_temp_artifact("com.apple.launchd"));
    }

    #[test]
    fn wildcard_semantics() {
        assert!(wildcard_match("*", ""));
        assert!(wildcard_match("a*c", "abbbc"));
        assert!(wildcard_match("a*c", "ac"));
        assert!(!wildcard_match("a*c", "abd"));
        assert!(wildcard_match("*x*y", "axbxy"));
        assert!(!wildcard_match("abc", "abcd"));
        assert!(wildcard_match("abc", "abc"));
    }

    #[test]
    fn du_and_df_parsing() {
        assert_eq!(
            parse_du_size("1.2G\t/work/game/build\n").as_deref(),
            Some("1.2G")
        );
        assert_eq!(parse_du_size(""), None);

        let df = "Filesystem Size Used Avail Capacity\n/dev/disk3s1 460Gi 300Gi 160Gi 66%\n";
        assert_eq!(
            parse_df_summary(df).as_deref(),
            Some("/dev/disk3s1 460Gi 300Gi 160Gi 66%")
        );
        assert_eq!(parse_df_summary("Filesystem Size\n"), None);
    }
}
