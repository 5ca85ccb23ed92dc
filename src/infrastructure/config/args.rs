use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "relay-scheduler",
    version,
    about = "Push relay ON/OFF schedules to a WebSocket server",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Schedule server host (defaults to localhost).
    #[arg(long, env = "RELAY_WS_HOST")]
    pub host: Option<String>,

    /// Schedule server port.
    #[arg(short, long, env = "RELAY_WS_PORT")]
    pub port: Option<u16>,
}
