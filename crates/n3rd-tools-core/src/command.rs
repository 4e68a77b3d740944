//! # Command Module
//!
//! Description of an external process invocation.
//!
//! The core never spawns anything. Tools build a [`CommandSpec`] and hand it
//! to whatever runner the app layer provides.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// A program, its arguments and an optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name, resolved through `PATH` by the runner.
    pub program: String,
    /// Arguments, passed verbatim (no shell).
    pub args: Vec<OsString>,
    /// Working directory, inherited when `None`.
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a command with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Run the command from `dir`.
    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Arguments as UTF-8 (lossy), for logging and assertions.
    #[must_use]
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Position of `flag` in the argument list.
    #[must_use]
    pub fn position_of(&self, flag: &str) -> Option<usize> {
        self.args.iter().position(|a| a == flag)
    }

    /// The argument following `flag`, if any.
    #[must_use]
    pub fn value_of(&self, flag: &str) -> Option<String> {
        let idx = self.position_of(flag)?;
        self.args
            .get(idx + 1)
            .map(|a| a.to_string_lossy().into_owned())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_args_in_order() {
        let cmd = CommandSpec::new("pkill").arg("-f").arg("flutter run");
        assert_eq!(cmd.program, "pkill");
        assert_eq!(cmd.args_lossy(), vec!["-f", "flutter run"]);
        assert!(cmd.cwd.is_none());
    }

    #[test]
    fn value_of_returns_following_argument() {
        let cmd = CommandSpec::new("ffmpeg").args(["-crf", "18", "-y"]);
        assert_eq!(cmd.value_of("-crf").as_deref(), Some("18"));
        assert_eq!(cmd.value_of("-y"), None);
        assert_eq!(cmd.value_of("-an"), None);
    }

    #[test]
    fn display_quotes_whitespace() {
        let cmd = CommandSpec::new("pkill").args(["-f", "flutter run"]);
        assert_eq!(cmd.to_string(), "pkill -f 'flutter run'");
    }
}
