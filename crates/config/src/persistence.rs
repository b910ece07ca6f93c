//! File system persistence for configuration
//!
//! Writes go to a temporary file that is renamed over the real one, and the
//! previous file is kept as `config.toml.backup`.

use crate::error::join_errors;
use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Handles configuration file persistence
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    /// Creates a new persistence handler for the given config file path
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Loads configuration from file
    ///
    /// If the file doesn't exist, returns the default config.
    /// If the file is empty or corrupted, returns an error.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::info!(
                "Config file not found at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        // An empty file is treated as damaged, not as "use defaults"
        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Config file is empty or contains only whitespace",
                ),
            });
        }

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: self.config_path.clone(),
            source: e,
        })?;

        if config.version != CONFIG_VERSION {
            log::warn!(
                "Config version {} differs from supported version {}, reading it as-is",
                config.version,
                CONFIG_VERSION
            );
        }

        // Invalid values are reported but not fatal here; the caller decides
        if let Err(errors) = config.validate() {
            log::warn!("Config validation warnings: {}", join_errors(&errors));
        }

        Ok(config)
    }

    /// Validates, backs up the previous file, then replaces it atomically
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        if let Err(errors) = config.validate() {
            return Err(ConfigError::ValidationError(join_errors(&errors)));
        }

        let dir = self
            .config_path
            .parent()
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: format!("{} has no parent directory", self.config_path.display()),
            })?;

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| ConfigError::DirectoryCreationError {
                path: dir.to_path_buf(),
                source: e,
            })?;
            log::info!("Created config directory: {}", dir.display());
        }

        if self.config_path.exists() {
            let backup_path = self.config_path.with_extension("toml.backup");
            fs::copy(&self.config_path, &backup_path)
                .map_err(|source| ConfigError::BackupError { source })?;
            log::debug!("Previous config kept at {}", backup_path.display());
        }

        let contents = toml::to_string_pretty(config).map_err(ConfigError::SerializeError)?;
        self.replace_file(dir, &contents)?;

        log::info!("Config saved to {}", self.config_path.display());
        Ok(())
    }

    /// Writes `contents` beside the config file and renames it into place
    fn replace_file(&self, dir: &Path, contents: &str) -> ConfigResult<()> {
        let mut staged = NamedTempFile::new_in(dir).map_err(ConfigError::IoError)?;
        staged
            .write_all(contents.as_bytes())
            .and_then(|_| staged.flush())
            .map_err(ConfigError::IoError)?;

        staged
            .persist(&self.config_path)
            .map(|_| ())
            .map_err(|e| ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e.error,
            })
    }
}
