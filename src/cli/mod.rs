//! CLI module for item-api
//!
//! Provides the command-line interface:
//! - init: write a starter config and bootstrap the database
//! - serve: load config and run the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run_command, serve};
pub use errors::{CliError, CliResult};

/// Parse arguments and dispatch.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}
