//! CLI-specific error types. All CLI errors are fatal.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("config serialization: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("already initialized: {0}")]
    AlreadyInitialized(String),
}
