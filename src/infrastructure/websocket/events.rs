use tokio::sync::mpsc;

use crate::domain::connection::{ConnectionEvent, ConnectionId, TimerHandle};

/// Event produced by a transport or timer task for the app loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    Connection {
        connection: ConnectionId,
        event: ConnectionEvent,
    },
    TimerFired(TimerHandle),
}

pub type DriverSender = mpsc::UnboundedSender<DriverEvent>;
pub type DriverReceiver = mpsc::UnboundedReceiver<DriverEvent>;

/// Creates the channel that feeds driver events to the app loop.
#[must_use]
pub fn driver_channel() -> (DriverSender, DriverReceiver) {
    mpsc::unbounded_channel()
}
