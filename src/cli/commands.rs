//! CLI command implementations.

use std::path::Path;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::config::ServerConfig;
use crate::observability::{Logger, Severity};
use crate::rest_api::HttpServer;
use crate::store;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command.
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Init { config } => init(&config),
        Command::Serve { config } => serve(&config),
    }
}

/// Write a starter config with a freshly generated codec secret and
/// bootstrap the database schema.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::AlreadyInitialized(
            config_path.display().to_string(),
        ));
    }

    // The database lives next to the config file.
    let db_path = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("item-api.db");

    let config = ServerConfig {
        codec_secret: generate_secret(),
        db_path,
        ..ServerConfig::default()
    };

    // Bootstrap the schema so `serve` starts against a ready database.
    drop(store::open(&config.db_path)?);

    let raw = serde_json::to_string_pretty(&config)?;
    std::fs::write(config_path, raw)?;

    let path_str = config_path.display().to_string();
    Logger::log(Severity::Info, "initialized", &[("config", path_str.as_str())]);
    Ok(())
}

/// Load config, fail fast on an unusable database, then serve.
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = ServerConfig::load(config_path)?;
    config.validate()?;

    // Open once up front: a bad path or corrupt file should fail here,
    // not on the first request.
    drop(store::open(&config.db_path)?);

    let server = HttpServer::new(config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server.start())?;
    Ok(())
}

/// 256-bit random secret, url-safe base64.
fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secret_is_random() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(a, b);
        assert!(a.len() >= 42);
    }

    #[test]
    fn test_init_writes_config_and_db() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("item-api.json");

        init(&config_path).unwrap();

        let loaded = ServerConfig::load(&config_path).unwrap();
        assert!(loaded.validate().is_ok());
        assert_eq!(loaded.db_path, dir.path().join("item-api.db"));
        assert!(loaded.db_path.exists());
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("item-api.json");
        std::fs::write(&config_path, "{}").unwrap();
        assert!(matches!(
            init(&config_path),
            Err(CliError::AlreadyInitialized(_))
        ));
    }
}
