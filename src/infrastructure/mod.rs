//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// WebSocket transport and reconnect timer.
pub mod websocket;

pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use websocket::{
    DriverEvent, DriverReceiver, DriverSender, TokioTimer, WebSocketTransport, driver_channel,
};
