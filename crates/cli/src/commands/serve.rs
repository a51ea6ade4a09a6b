//! Serve command implementation
//!
//! This module implements the `userkit serve` command: it resolves the
//! configuration, opens the chosen storage backend and runs the HTTP server
//! until Ctrl+C or SIGTERM.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::signal;
use tracing::{error, info};
use userkit_adapters::HttpServer;
use userkit_model::UserStorage;
use userkit_storage::{InMemoryUserStore, SledUserStore};

use crate::config::{StorageBackend, StorageConfig, UserkitConfig};

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Storage backend (overrides the config file)
    #[arg(short, long, value_enum)]
    pub backend: Option<StorageBackend>,
    /// Database path for the sled backend (overrides the config file)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

impl ServeArgs {
    /// Load the config file, if any, and apply command line overrides
    pub fn resolve_config(&self) -> Result<UserkitConfig> {
        let mut config = match &self.config {
            Some(path) => UserkitConfig::load(path)?,
            None => UserkitConfig::default(),
        };

        if let Some(port) = self.port {
            config.server.bind_addr.set_port(port);
        }
        if let Some(backend) = self.backend {
            config.storage.backend = backend;
        }
        if let Some(db) = &self.db {
            config.storage.db_path = db.clone();
        }

        config
            .server
            .validate()
            .context("Invalid server configuration")?;

        Ok(config)
    }
}

/// Execute the serve command
pub async fn execute_serve_command(args: ServeArgs) -> Result<()> {
    let config = args.resolve_config()?;

    let storage = open_storage(&config.storage)?;
    let user_count = storage
        .count()
        .await
        .context("Failed to count stored users")?;
    info!(
        "Using {:?} storage with {} existing users",
        config.storage.backend, user_count
    );

    let server = HttpServer::new(config.server, storage);
    server
        .run_until(wait_for_shutdown())
        .await
        .context("HTTP server failed")?;

    info!("Shutdown complete");
    Ok(())
}

/// Open the configured storage backend
pub fn open_storage(config: &StorageConfig) -> Result<Arc<dyn UserStorage>> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryUserStore::new())),
        StorageBackend::Sled => {
            validate_db_path(&config.db_path)?;

            let store = SledUserStore::open(&config.db_path).with_context(|| {
                format!("Failed to open database at {}", config.db_path.display())
            })?;
            Ok(Arc::new(store))
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Make sure the database directory exists and is writable
pub fn validate_db_path(db_path: &Path) -> Result<()> {
    std::fs::create_dir_all(db_path)
        .with_context(|| format!("Failed to create database directory: {}", db_path.display()))?;

    // Check write permissions by trying to create a test file
    let test_file = db_path.join(".userkit_write_test");
    match std::fs::write(&test_file, b"test") {
        Ok(_) => {
            let _ = std::fs::remove_file(&test_file);
            Ok(())
        }
        Err(e) => {
            anyhow::bail!("Cannot write to database path {}: {}", db_path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_validate_db_path() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("db");

        assert!(validate_db_path(&db_path).is_ok());
        assert!(db_path.is_dir());
        assert!(!db_path.join(".userkit_write_test").exists());
    }

    #[test]
    fn test_resolve_config_defaults() {
        let config = ServeArgs::default().resolve_config().unwrap();
        assert_eq!(config, UserkitConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("userkit.toml");
        std::fs::write(
            &path,
            "[server]\nbind_addr = \"0.0.0.0:9000\"\n[storage]\nbackend = \"sled\"\ndb_path = \"from-file\"\n",
        )
        .unwrap();

        let args = ServeArgs {
            config: Some(path),
            port: Some(9100),
            backend: None,
            db: Some(PathBuf::from("from-flag")),
        };
        let config = args.resolve_config().unwrap();

        assert_eq!(config.server.bind_addr, "0.0.0.0:9100".parse().unwrap());
        assert_eq!(config.storage.backend, StorageBackend::Sled);
        assert_eq!(config.storage.db_path, PathBuf::from("from-flag"));
    }

    #[test]
    fn test_resolve_config_rejects_bad_api_root() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("userkit.toml");
        std::fs::write(&path, "[server]\napi_root = \"api\"\n").unwrap();

        let args = ServeArgs {
            config: Some(path),
            ..Default::default()
        };
        assert!(args.resolve_config().is_err());
    }

    #[tokio::test]
    async fn test_open_storage_backends() {
        let memory = open_storage(&StorageConfig::default()).unwrap();
        assert_eq!(memory.count().await.unwrap(), 0);

        let temp_dir = TempDir::new().unwrap();
        let sled = open_storage(&StorageConfig {
            backend: StorageBackend::Sled,
            db_path: temp_dir.path().join("users"),
        })
        .unwrap();
        assert_eq!(sled.count().await.unwrap(), 0);
    }
}
