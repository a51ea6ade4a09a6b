//! Configuration file handling
//!
//! The `serve` command reads an optional TOML file with a `[server]` and a
//! `[storage]` table. Every key is optional; command line flags win over
//! the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use userkit_adapters::ServerConfig;

/// Which [`UserStorage`](userkit_model::UserStorage) backend to serve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Users are lost when the process exits
    #[default]
    Memory,
    /// Users persist in a sled database at `db_path`
    Sled,
}

/// Storage section of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            db_path: PathBuf::from(".userkit"),
        }
    }
}

/// Full configuration for `userkit serve`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserkitConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl UserkitConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_is_default() {
        let config = UserkitConfig::from_toml_str("").unwrap();
        assert_eq!(config, UserkitConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = UserkitConfig::from_toml_str(
            r#"
            [server]
            bind_addr = "0.0.0.0:9000"
            api_root = "/v1"

            [storage]
            backend = "sled"
            db_path = "/var/lib/userkit"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_addr, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.server.api_root, "/v1");
        assert_eq!(config.storage.backend, StorageBackend::Sled);
        assert_eq!(config.storage.db_path, PathBuf::from("/var/lib/userkit"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = UserkitConfig::from_toml_str("[server]\napi_root = \"/v2\"\n").unwrap();

        assert_eq!(config.server.api_root, "/v2");
        assert_eq!(config.server.bind_addr, ServerConfig::default().bind_addr);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result = UserkitConfig::from_toml_str("[storage]\nbackend = \"postgres\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("userkit.toml");
        std::fs::write(&path, "[storage]\nbackend = \"memory\"\n").unwrap();

        let config = UserkitConfig::load(&path).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);

        assert!(UserkitConfig::load(&temp_dir.path().join("missing.toml")).is_err());
    }
}
