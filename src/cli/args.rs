//! CLI argument definitions using clap
//!
//! Commands:
//! - item-api init --config <path>
//! - item-api serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// item-api - transactional mutation service for the item aggregate
#[derive(Parser, Debug)]
#[command(name = "item-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter configuration file and bootstrap the database
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./item-api.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./item-api.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
