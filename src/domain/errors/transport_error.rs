//! Transport error types.

use thiserror::Error;

/// Connection-level failures reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum TransportError {
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("websocket error: {message}")]
    WebSocket { message: String },

    #[error("timeout waiting for {operation}")]
    Timeout { operation: String },

    #[error("connection {connection} is not open")]
    NotConnected { connection: u64 },

    #[error("channel closed")]
    ChannelClosed,
}

impl TransportError {
    /// Creates connection failed error.
    #[must_use]
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    /// Creates websocket error.
    #[must_use]
    pub fn websocket(message: impl Into<String>) -> Self {
        Self::WebSocket {
            message: message.into(),
        }
    }

    /// Creates timeout error.
    #[must_use]
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }
}
