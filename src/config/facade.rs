//! ConfigLoader: the entry point for loading and initializing configuration.

use super::layers;
use super::{TilefolioConfig, CONFIG_FILE_NAME};
use crate::error::ApiError;
use config::ConfigError;
use std::path::{Path, PathBuf};

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Path of the workspace config file.
    pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
        workspace_root.join(CONFIG_FILE_NAME)
    }

    /// Load configuration from the workspace file and environment.
    pub fn load(workspace_root: &Path) -> Result<TilefolioConfig, ConfigError> {
        layers::load_workspace(workspace_root)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<TilefolioConfig, ConfigError> {
        layers::load_file(path)
    }

    /// Create default configuration.
    pub fn default() -> TilefolioConfig {
        TilefolioConfig::default()
    }

    /// Write the default configuration to the workspace config file.
    ///
    /// Returns the written path. An existing file is kept unless `force` is set.
    pub fn write_default(workspace_root: &Path, force: bool) -> Result<PathBuf, ApiError> {
        let path = Self::workspace_config_path(workspace_root);
        if path.exists() && !force {
            return Err(ApiError::ConfigError(format!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        let content = toml::to_string_pretty(&TilefolioConfig::default()).map_err(|e| {
            ApiError::ConfigError(format!("Failed to serialize default config: {}", e))
        })?;
        std::fs::write(&path, content).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to write config to {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(config.content.root, PathBuf::from("content"));
        assert_eq!(config.content.extension, "txt");
        assert!(config.snapshot.pretty);
        assert_eq!(config.logging.output, "stderr");
    }

    #[test]
    fn test_workspace_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[content]\nroot = \"src/filetree\"\n\n[snapshot]\npretty = false\n",
        )
        .unwrap();

        let config = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(config.content.root, PathBuf::from("src/filetree"));
        assert_eq!(config.content.extension, "txt");
        assert!(!config.snapshot.pretty);
    }

    #[test]
    fn test_write_default_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = ConfigLoader::write_default(temp.path(), false).unwrap();
        assert!(path.exists());
        assert!(ConfigLoader::write_default(temp.path(), false).is_err());
        assert!(ConfigLoader::write_default(temp.path(), true).is_ok());

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.snapshot.path, PathBuf::from("generated/contentData.json"));
    }
}
