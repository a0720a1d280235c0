//! Configuration loading.
//!
//! Precedence, lowest to highest: built-in defaults, the global file
//! (`~/.config/imagefind/config.toml`), an explicit `--config` file, and
//! `IMAGEFIND_*` environment variables with `__` separating nested keys.

use crate::error::FindError;
use crate::logging::LoggingConfig;
use crate::store::StoreSchema;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Record store column and tier bindings.
    #[serde(default)]
    pub store: StoreSchema,

    #[serde(default)]
    pub metadata: MetadataConfig,
}

/// Name table loading options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Force a cell delimiter instead of auto-detecting one.
    #[serde(default)]
    pub delimiter: Option<char>,
}

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from standard sources plus an optional explicit file.
    pub fn load(explicit: Option<&Path>) -> Result<AppConfig, FindError> {
        let mut builder = Config::builder();
        if let Some(global) = Self::global_config_path() {
            builder = builder.add_source(File::from(global).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.to_path_buf()));
        }
        builder = builder.add_source(
            Environment::with_prefix("IMAGEFIND")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "imagefind", "imagefind")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.image_column, "IMAGE_ID");
        assert_eq!(config.store.tier_column, "MULTI_RECORD_TYPE");
        assert_eq!(config.store.highest_tier, 2);
        assert_eq!(config.metadata.delimiter, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[store]\nhighest_tier = 3\ntier_column = \"RECORD_KIND\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.store.highest_tier, 3);
        assert_eq!(config.store.tier_column, "RECORD_KIND");
        assert_eq!(config.store.image_column, "IMAGE_ID");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load(Some(&temp.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, FindError::Config(_)));
    }
}
