//! # Console Module
//!
//! Human-readable progress output on stdout.
//!
//! Silent in `--json` mode so that stdout carries only the JSON report.
//! Diagnostics go through `tracing` on stderr regardless.

use std::fmt::Display;

/// Banner rule used by the video generator.
pub const RULE: &str = "==================================================";

/// Progress printer.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    quiet: bool,
}

impl Console {
    /// Printing console, or quiet when `json` output was requested.
    #[must_use]
    pub fn new(json: bool) -> Self {
        Self { quiet: json }
    }

    /// A console that prints nothing.
    #[must_use]
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn line(&self, text: impl Display) {
        if !self.quiet {
            println!("{text}");
        }
    }

    pub fn blank(&self) {
        self.line("");
    }

    /// `  ✅ message`
    pub fn ok(&self, text: impl Display) {
        self.line(format_args!("  ✅ {text}"));
    }

    /// `  ⚠️  message`
    pub fn warn(&self, text: impl Display) {
        self.line(format_args!("  ⚠️  {text}"));
    }

    /// `  ❌ message`
    pub fn fail(&self, text: impl Display) {
        self.line(format_args!("  ❌ {text}"));
    }

    /// `  ℹ️  message`
    pub fn info(&self, text: impl Display) {
        self.line(format_args!("  ℹ️  {text}"));
    }
}
