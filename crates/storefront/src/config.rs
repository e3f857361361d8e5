//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FITKART_DATA_DIR` - Directory holding the persisted records (default: .fitkart)
//! - `FITKART_STORAGE_LAYOUT` - `split` or `snapshot` (default: split)
//! - `FITKART_CATALOG_FILE` - YAML catalog seed used instead of the bundled one
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g. development)

use std::path::PathBuf;

use thiserror::Error;

use crate::persist::StorageLayout;

const DEFAULT_DATA_DIR: &str = ".fitkart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for the file-backed record store
    pub data_dir: PathBuf,
    /// How state is split into records
    pub layout: StorageLayout,
    /// Custom catalog seed file
    pub catalog_file: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            layout: StorageLayout::default(),
            catalog_file: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = get_optional("FITKART_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let layout = match get_optional("FITKART_STORAGE_LAYOUT") {
            Some(value) => value.parse::<StorageLayout>().map_err(|e| {
                ConfigError::InvalidEnvVar("FITKART_STORAGE_LAYOUT".to_string(), e)
            })?,
            None => StorageLayout::default(),
        };
        let catalog_file = get_optional("FITKART_CATALOG_FILE").map(PathBuf::from);

        Ok(Self {
            data_dir,
            layout,
            catalog_file,
            sentry_dsn: get_optional("SENTRY_DSN"),
            sentry_environment: get_optional("SENTRY_ENVIRONMENT"),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".fitkart"));
        assert_eq!(config.layout, StorageLayout::Split);
        assert!(config.catalog_file.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FITKART_DATA_DIR", "/var/lib/fitkart"),
            ("FITKART_STORAGE_LAYOUT", "snapshot"),
            ("FITKART_CATALOG_FILE", "catalog.yaml"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/fitkart"));
        assert_eq!(config.layout, StorageLayout::Snapshot);
        assert_eq!(config.catalog_file, Some(PathBuf::from("catalog.yaml")));
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config_from(&[("FITKART_DATA_DIR", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".fitkart"));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_layout() {
        let err = config_from(&[("FITKART_STORAGE_LAYOUT", "atomic")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "FITKART_STORAGE_LAYOUT"));
    }
}
