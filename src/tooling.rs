//! Tooling Layer
//!
//! The `tilefolio` command line: build, watch, and inspect the compiled
//! snapshot from a workspace.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
