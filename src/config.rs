//! # Server Configuration
//!
//! JSON configuration for the HTTP server, the database location, and
//! the identifier codec secret. Every field has a serde default so a
//! partial file is valid; `validate` enforces the fields that must not
//! be left empty before serving.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means permissive (development)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Secret for the identifier codec. Must match the encoder used by
    /// the services that hand out opaque ids.
    #[serde(default)]
    pub codec_secret: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./item-api.db")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            db_path: default_db_path(),
            codec_secret: String::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        let config: Self = serde_json::from_str(&raw).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Reject configurations that cannot serve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.codec_secret.trim().is_empty() {
            return Err(ConfigError::MissingField("codec_secret"));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {0}: {1}")]
    Io(String, #[source] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("required config field is empty: {0}")]
    MissingField(&'static str),
}
