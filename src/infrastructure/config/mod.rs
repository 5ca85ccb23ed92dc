//! Application configuration.

pub mod app_config;
pub mod args;
mod state_config;
pub mod storage;

pub use app_config::{AppConfig, DEFAULT_HOST, DEFAULT_PORT, LogLevel, ServerConfig, UiConfig};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};
