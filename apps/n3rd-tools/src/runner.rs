//! # Runner Module
//!
//! Execution of [`CommandSpec`]s.
//!
//! Commands are executed through the [`ProcessRunner`] trait so that tests
//! can substitute a scripted runner for `ffmpeg`, `flutter` and friends.

use n3rd_tools_core::CommandSpec;
use std::io;
use std::process::{Command, Stdio};

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// A successful run printing `stdout`.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A run that exited with `code`.
    #[must_use]
    pub fn exit(code: i32) -> Self {
        Self {
            code: Some(code),
            success: code == 0,
            ..Self::default()
        }
    }
}

/// Something that can run an external command to completion.
pub trait ProcessRunner {
    /// Run `command`, blocking until it exits.
    ///
    /// `Err` means the process could not be started at all.
    fn run(&self, command: &CommandSpec) -> io::Result<ProcessOutput>;
}

/// Runs commands with `std::process::Command`, stdin detached.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> io::Result<ProcessOutput> {
        tracing::debug!(command = %command, cwd = ?command.cwd, "spawning");

        let mut process = Command::new(&command.program);
        process.args(&command.args).stdin(Stdio::null());
        if let Some(cwd) = &command.cwd {
            process.current_dir(cwd);
        }

        let output = process.output()?;
        let result = ProcessOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success {
            tracing::debug!(
                program = %command.program,
                code = ?result.code,
                stderr = %result.stderr.trim(),
                "command exited unsuccessfully"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_drives_success() {
        assert!(ProcessOutput::exit(0).success);
        assert!(!ProcessOutput::exit(1).success);
        assert_eq!(ProcessOutput::ok("x").stdout, "x");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let result = SystemRunner.run(&CommandSpec::new("n3rd-tools-no-such-program"));
        assert!(result.is_err());
    }
}
