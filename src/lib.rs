//! Relay Scheduler - a terminal client for pushing relay ON/OFF schedules.
//!
//! The client keeps a single WebSocket connection to the schedule server,
//! reconnects on a fixed interval after it drops, and gates submission on the
//! connection being open.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the connection manager.
pub mod application;
/// Domain layer containing value types, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing the WebSocket transport, timer and config.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
