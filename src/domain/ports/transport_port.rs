//! Transport port definition.

use crate::domain::connection::ConnectionId;
use crate::domain::errors::TransportError;

/// Port for a message-oriented full-duplex connection.
///
/// Opening is non-blocking: the outcome of an attempt and everything that
/// happens on the connection afterwards is delivered back to the caller as
/// `ConnectionEvent`s tagged with the returned id.
pub trait TransportPort {
    /// Starts a connection attempt to `url`.
    fn open(&mut self, url: &str) -> ConnectionId;

    /// Closes the connection and releases its resources. Unknown ids are ignored.
    fn close(&mut self, connection: ConnectionId);

    /// Queues a text frame on an open connection.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the connection is gone or cannot accept writes.
    fn send(&mut self, connection: ConnectionId, text: String) -> Result<(), TransportError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Transport that records calls instead of touching the network.
    #[derive(Debug, Default)]
    pub struct RecordingTransport {
        next_id: u64,
        /// Urls passed to `open`, in order.
        pub opened: Vec<String>,
        /// Ids passed to `close`, in order.
        pub closed: Vec<ConnectionId>,
        /// Frames accepted by `send`.
        pub sent: Vec<(ConnectionId, String)>,
        /// Makes every `send` fail.
        pub fail_sends: bool,
    }

    impl RecordingTransport {
        /// Creates a transport that accepts every send.
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl TransportPort for RecordingTransport {
        fn open(&mut self, url: &str) -> ConnectionId {
            let id = ConnectionId(self.next_id);
            self.next_id += 1;
            self.opened.push(url.to_string());
            id
        }

        fn close(&mut self, connection: ConnectionId) {
            self.closed.push(connection);
        }

        fn send(&mut self, connection: ConnectionId, text: String) -> Result<(), TransportError> {
            if self.fail_sends {
                return Err(TransportError::ChannelClosed);
            }
            self.sent.push((connection, text));
            Ok(())
        }
    }
}
