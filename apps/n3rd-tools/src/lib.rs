//! # n3rd-tools Library
//!
//! This library exposes the n3rd-tools modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod console;
pub mod error;
pub mod fsutil;
pub mod runner;

// Re-export the core crate for convenience
pub use n3rd_tools_core;
