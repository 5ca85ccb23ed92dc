//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;

pub(crate) const APP_NAME: &str = "relay-scheduler";
pub(crate) const APP_QUALIFIER: &str = "io";
pub(crate) const APP_ORGANIZATION: &str = "relay-scheduler";

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost";
/// Port the schedule server listens on by default.
pub const DEFAULT_PORT: u16 = 8765;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration loaded from `config.toml` and the CLI.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Schedule server endpoint.
    #[serde(default)]
    pub server: ServerConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Schedule server endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host. Falls back to `localhost` when unset or blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Returns the effective host.
    #[must_use]
    pub fn effective_host(&self) -> &str {
        self.host
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .unwrap_or(DEFAULT_HOST)
    }

    /// Returns the WebSocket url of the schedule server.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!("ws://{}:{}", self.effective_host(), self.port)
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Timestamp format string (chrono format) for the status line.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Show when the status line last changed.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            show_timestamps: true,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(host) = args.host {
            self.server.host = Some(host);
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("relay-scheduler.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
            log_level = "debug"

            [server]
            host = "192.168.1.20"
            port = 9000

            [ui]
            show_timestamps = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.server.endpoint_url(), "ws://192.168.1.20:9000");
        assert!(!config.ui.show_timestamps);
        assert_eq!(config.ui.timestamp_format, "%H:%M:%S");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.endpoint_url(), "ws://localhost:8765");
        assert!(config.ui.show_timestamps);
    }

    #[test]
    fn test_blank_host_falls_back_to_localhost() {
        let server = ServerConfig {
            host: Some("  ".to_string()),
            port: 8765,
        };
        assert_eq!(server.endpoint_url(), "ws://localhost:8765");
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config: AppConfig = toml::from_str("[server]\nport = 9000\n").unwrap();
        let args = CliArgs {
            config: None,
            log_path: None,
            log_level: Some(LogLevel::Trace),
            host: Some("relay.local".to_string()),
            port: Some(8800),
        };

        config.merge_with_args(args);

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.server.endpoint_url(), "ws://relay.local:8800");
    }
}
