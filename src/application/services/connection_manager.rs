//! Reconnecting connection manager.
//!
//! Owns the single connection to the schedule server, the reconnect timer and
//! the status sink. Every input (user action, transport event, timer fire) is
//! handled to completion before the next one, so no locking is involved.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::connection::{ConnectionEvent, ConnectionId, ConnectionState, TimerHandle};
use crate::domain::errors::{SendError, SubmitError};
use crate::domain::ports::{StatusSink, TimerPort, TransportPort};
use crate::domain::schedule::Schedule;
use crate::domain::status::StatusMessage;

/// Delay before a closed connection is re-attempted.
pub const RECONNECT_INTERVAL: Duration = Duration::from_millis(5000);

const STATUS_CONNECTING: &str = "Connecting to server...";
const STATUS_CONNECTED: &str = "Connected to server.";
const STATUS_DISCONNECTED: &str = "Disconnected. Attempting to reconnect...";
const STATUS_NOT_CONNECTED: &str = "Error: Not connected to server. Please wait.";
const STATUS_SEND_FAILED: &str = "Error sending schedule. Check the log for details.";

/// Client-side state machine for one reconnecting connection.
pub struct ConnectionManager<T, R, S> {
    endpoint: String,
    transport: T,
    timer: R,
    sink: S,
    state: ConnectionState,
    connection: Option<ConnectionId>,
    reconnect_timer: Option<TimerHandle>,
}

impl<T, R, S> ConnectionManager<T, R, S>
where
    T: TransportPort,
    R: TimerPort,
    S: StatusSink,
{
    /// Creates an idle manager for `endpoint`. Nothing is started until `connect`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, transport: T, timer: R, sink: S) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
            timer,
            sink,
            state: ConnectionState::Idle,
            connection: None,
            reconnect_timer: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    #[must_use]
    pub const fn pending_reconnect(&self) -> bool {
        self.reconnect_timer.is_some()
    }

    #[must_use]
    pub const fn current_connection(&self) -> Option<ConnectionId> {
        self.connection
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the status sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Starts a new connection attempt.
    ///
    /// A no-op while a connection is already open or being established.
    pub fn connect(&mut self) {
        if self.state.is_active() {
            info!(state = %self.state, "Connection already active, ignoring connect");
            return;
        }

        self.cancel_reconnect_timer();

        info!(url = %self.endpoint, "Attempting to connect");
        self.sink.set_status(StatusMessage::neutral(STATUS_CONNECTING));
        self.sink.set_submit_enabled(false);

        if let Some(previous) = self.connection.take() {
            debug!(connection = %previous, "Closing previous connection");
            self.transport.close(previous);
        }

        let connection = self.transport.open(&self.endpoint);
        self.connection = Some(connection);
        self.state = ConnectionState::Connecting;
    }

    /// Explicit reconnect requested by the user. Same guard as `connect`.
    pub fn reconnect(&mut self) {
        debug!("Manual reconnect requested");
        self.connect();
    }

    /// Validates and sends a schedule.
    ///
    /// # Errors
    ///
    /// Returns the reason the schedule was not sent. The failure has already
    /// been reported to the status sink.
    pub fn submit(&mut self, schedule: &Schedule) -> Result<(), SubmitError> {
        if let Err(e) = schedule.validate() {
            debug!(error = %e, "Rejected schedule");
            self.sink.set_status(StatusMessage::error(e.to_string()));
            return Err(e.into());
        }

        match self.connection {
            Some(connection) if self.state.is_open() => self.send_schedule(connection, schedule),
            _ => {
                warn!(state = %self.state, "Submit attempted while not connected");
                self.sink.set_status(StatusMessage::error(STATUS_NOT_CONNECTED));

                if self.reconnect_timer.is_none() {
                    self.connect();
                }

                Err(SubmitError::NotConnected)
            }
        }
    }

    fn send_schedule(
        &mut self,
        connection: ConnectionId,
        schedule: &Schedule,
    ) -> Result<(), SubmitError> {
        let result = schedule.to_wire().and_then(|wire| {
            self.transport
                .send(connection, wire)
                .map_err(SendError::from)
        });

        match result {
            Ok(()) => {
                info!(%connection, %schedule, "Sent schedule");
                self.sink.set_status(StatusMessage::info(format!(
                    "Schedule ({schedule}) sent. Waiting for confirmation..."
                )));
                self.sink.set_submit_enabled(false);
                Ok(())
            }
            Err(e) => {
                error!(%connection, error = %e, "Failed to send schedule");
                self.sink.set_status(StatusMessage::error(STATUS_SEND_FAILED));
                Err(e.into())
            }
        }
    }

    /// Handles an event reported by the transport.
    ///
    /// Events from any connection other than the current one are ignored.
    pub fn handle_event(&mut self, connection: ConnectionId, event: ConnectionEvent) {
        if self.connection != Some(connection) {
            debug!(%connection, ?event, "Ignoring event from stale connection");
            return;
        }

        match event {
            ConnectionEvent::Opened => self.on_opened(connection),
            ConnectionEvent::MessageReceived(text) => self.on_message(connection, &text),
            ConnectionEvent::Errored(reason) => {
                // The close that always follows carries the status change.
                warn!(%connection, %reason, "Connection error");
            }
            ConnectionEvent::Closed { code, reason } => self.on_closed(connection, code, &reason),
        }
    }

    /// Handles a fired reconnect timer.
    ///
    /// Handles that are no longer pending (cancelled after firing) are ignored.
    pub fn handle_timer(&mut self, handle: TimerHandle) {
        if self.reconnect_timer != Some(handle) {
            debug!(?handle, "Ignoring stale reconnect timer");
            return;
        }

        self.reconnect_timer = None;
        info!("Reconnect timer fired");
        self.connect();
    }

    /// Cancels the reconnect timer and closes the connection.
    pub fn shutdown(&mut self) {
        self.cancel_reconnect_timer();

        if let Some(connection) = self.connection.take() {
            info!(%connection, "Closing connection");
            self.transport.close(connection);
        }

        self.state = ConnectionState::Idle;
    }

    fn on_opened(&mut self, connection: ConnectionId) {
        if self.state != ConnectionState::Connecting {
            debug!(%connection, state = %self.state, "Ignoring duplicate open");
            return;
        }

        info!(%connection, "Connection opened");
        self.state = ConnectionState::Open;
        self.sink.set_status(StatusMessage::success(STATUS_CONNECTED));
        self.sink.set_submit_enabled(true);

        if self.reconnect_timer.is_some() {
            self.cancel_reconnect_timer();
            debug!("Cleared reconnect timer on open");
        }
    }

    fn on_message(&mut self, connection: ConnectionId, text: &str) {
        if !self.state.is_open() {
            debug!(%connection, state = %self.state, "Ignoring message outside open state");
            return;
        }

        info!(%connection, message = %text, "Message from server");
        self.sink
            .set_status(StatusMessage::info(format!("Server: {text}")));
        self.sink.set_submit_enabled(true);
    }

    fn on_closed(&mut self, connection: ConnectionId, code: u16, reason: &str) {
        info!(%connection, code, reason, "Connection closed");

        self.sink.set_status(StatusMessage::warning(STATUS_DISCONNECTED));
        self.sink.set_submit_enabled(false);

        self.transport.close(connection);
        self.connection = None;

        if self.reconnect_timer.is_none() {
            info!(
                delay_ms = RECONNECT_INTERVAL.as_millis(),
                "Scheduling reconnect"
            );
            self.reconnect_timer = Some(self.timer.schedule(RECONNECT_INTERVAL));
        }

        self.state = ConnectionState::Closed {
            pending_reconnect: self.reconnect_timer.is_some(),
        };
    }

    fn cancel_reconnect_timer(&mut self) {
        if let Some(handle) = self.reconnect_timer.take() {
            debug!(?handle, "Cancelling reconnect timer");
            self.timer.cancel(handle);
        }
    }
}
