//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the wayfarer binary.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{run_plan, run_serve, run_suggest};
