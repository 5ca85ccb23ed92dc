//! Connection state and events.

/// Identifies one connection attempt made by a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies one scheduled reconnect timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Lifecycle state of the managed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Nothing started yet.
    #[default]
    Idle,
    /// Handshake in progress.
    Connecting,
    /// Connected and able to send.
    Open,
    /// Connection lost.
    Closed {
        /// Whether a reconnect timer is scheduled.
        pending_reconnect: bool,
    },
}

impl ConnectionState {
    /// Returns whether schedules can be sent.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns whether a connection is open or being established.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Connecting | Self::Open)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Connecting => write!(f, "Connecting"),
            Self::Open => write!(f, "Open"),
            Self::Closed {
                pending_reconnect: true,
            } => write!(f, "Closed (reconnect pending)"),
            Self::Closed {
                pending_reconnect: false,
            } => write!(f, "Closed"),
        }
    }
}

/// Event reported by a transport for one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Handshake completed.
    Opened,
    /// Text payload received from the server.
    MessageReceived(String),
    /// Transport fault. Always followed by `Closed`.
    Errored(String),
    /// Connection ended.
    Closed {
        /// WebSocket close code.
        code: u16,
        /// Close reason.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_state_display() {
        assert_eq!(ConnectionState::Open.to_string(), "Open");
        assert_eq!(
            ConnectionState::Closed {
                pending_reconnect: true
            }
            .to_string(),
            "Closed (reconnect pending)"
        );
    }

    #[test]
    fn test_connection_state_checks() {
        assert!(ConnectionState::Open.is_open());
        assert!(ConnectionState::Open.is_active());
        assert!(ConnectionState::Connecting.is_active());
        assert!(!ConnectionState::Connecting.is_open());
        assert!(
            !ConnectionState::Closed {
                pending_reconnect: false
            }
            .is_active()
        );
        assert!(!ConnectionState::Idle.is_active());
    }
}
