//! Command-line surface: argument parsing, run configuration and dispatch

pub mod commands;
pub mod config;

pub use commands::{Cli, execute, run};
pub use config::{OutputMode, RunConfig};
