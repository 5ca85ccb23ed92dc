pub mod connection_manager;

pub use connection_manager::{ConnectionManager, RECONNECT_INTERVAL};
