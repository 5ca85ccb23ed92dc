//! On-disk `config.toml` and `state.toml`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use super::state_config::StateConfig;
use crate::domain::theme::ThemeMode;

const CONFIG_FILE_NAME: &str = "config.toml";
const STATE_FILE_NAME: &str = "state.toml";

#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("no platform configuration directory available")]
    NoConfigDir,

    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: toml::ser::Error,
    },
}

/// Settings file and remembered theme, both kept in one directory.
pub struct StorageManager {
    dir: PathBuf,
}

impl StorageManager {
    /// Roots storage at the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` when the platform has no home directory.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::with_dir(dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::NoConfigDir)
    }

    #[must_use]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Loads `config.toml`, or the file at `path_override`.
    ///
    /// A missing file is created with the defaults. A malformed one is left
    /// untouched and the defaults are used for this run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the defaults cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = path_override.map_or_else(|| self.dir.join(CONFIG_FILE_NAME), Path::to_path_buf);

        if let Some(config) = read_toml(&path)? {
            return Ok(config);
        }

        info!(path = %path.display(), "Writing default configuration");
        let config = AppConfig::default();
        write_toml(&path, &config)?;
        Ok(config)
    }

    /// Returns the theme saved by the last toggle, if any.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the state file exists but cannot be read.
    pub fn load_theme(&self) -> Result<Option<ThemeMode>, ConfigError> {
        let state: Option<StateConfig> = read_toml(&self.dir.join(STATE_FILE_NAME))?;
        Ok(state.and_then(|state| state.theme))
    }

    /// Remembers `theme` for the next start.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the state file cannot be written.
    pub fn save_theme(&self, theme: ThemeMode) -> Result<(), ConfigError> {
        let state = StateConfig { theme: Some(theme) };
        write_toml(&self.dir.join(STATE_FILE_NAME), &state)
    }
}

/// `Ok(None)` when the file does not exist. Parse failures fall back to `T::default()`.
fn read_toml<T: DeserializeOwned + Default>(path: &Path) -> Result<Option<T>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "File not present");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    Ok(Some(toml::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring malformed file");
        T::default()
    })))
}

/// Replaces `path` atomically, creating its directory first.
fn write_toml<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(value).map_err(|source| ConfigError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(write_err)?;
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_run_writes_defaults_into_missing_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("relay-scheduler");
        let storage = StorageManager::with_dir(root.clone());

        let config = storage.load_config(None).unwrap();

        assert_eq!(config.server.endpoint_url(), "ws://localhost:8765");
        let written = fs::read_to_string(root.join(CONFIG_FILE_NAME)).unwrap();
        assert!(written.contains("port = 8765"));
        assert_eq!(storage.load_config(None).unwrap().server, config.server);
    }

    #[test]
    fn test_malformed_config_is_kept_and_defaults_used() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::with_dir(dir.path().to_path_buf());
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[server\nport = ").unwrap();

        let config = storage.load_config(None).unwrap();

        assert_eq!(config.server.port, 8765);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[server\nport = ");
    }

    #[test]
    fn test_config_override_path() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::with_dir(dir.path().join("unused"));
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "[server]\nhost = \"relay.lan\"\n").unwrap();

        let config = storage.load_config(Some(&custom)).unwrap();

        assert_eq!(config.server.endpoint_url(), "ws://relay.lan:8765");
        assert!(!dir.path().join("unused").exists());
    }

    #[test]
    fn test_no_saved_theme() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::with_dir(dir.path().to_path_buf());

        assert_eq!(storage.load_theme().unwrap(), None);
    }

    #[test]
    fn test_theme_round_trips_through_state_file() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::with_dir(dir.path().join("nested"));

        storage.save_theme(ThemeMode::Dark).unwrap();

        let content = fs::read_to_string(dir.path().join("nested").join(STATE_FILE_NAME)).unwrap();
        assert_eq!(content.trim(), "theme = \"dark\"");
        assert_eq!(storage.load_theme().unwrap(), Some(ThemeMode::Dark));

        storage.save_theme(ThemeMode::Light).unwrap();
        assert_eq!(storage.load_theme().unwrap(), Some(ThemeMode::Light));
    }

    #[test]
    fn test_unknown_theme_value_is_ignored() {
        let dir = tempdir().unwrap();
        let storage = StorageManager::with_dir(dir.path().to_path_buf());
        fs::write(dir.path().join(STATE_FILE_NAME), "theme = \"sepia\"\n").unwrap();

        assert_eq!(storage.load_theme().unwrap(), None);
    }
}
