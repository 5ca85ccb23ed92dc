//! Application layer with the connection state machine.

/// Application services.
pub mod services;

pub use services::{ConnectionManager, RECONNECT_INTERVAL};
