//! Domain layer with core value types, errors and port definitions.

/// Connection state and events.
pub mod connection;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Relay schedule payload.
pub mod schedule;
/// Status messages.
pub mod status;
/// Theme preference.
pub mod theme;

pub use connection::{ConnectionEvent, ConnectionId, ConnectionState, TimerHandle};
pub use errors::{ScheduleError, SendError, SubmitError, TransportError};
pub use ports::{StatusSink, TimerPort, TransportPort};
pub use schedule::Schedule;
pub use status::{Severity, StatusMessage};
pub use theme::ThemeMode;
