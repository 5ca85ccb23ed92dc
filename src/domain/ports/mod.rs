mod status_sink;
mod timer_port;
mod transport_port;

pub use status_sink::StatusSink;
pub use timer_port::TimerPort;
pub use transport_port::TransportPort;

#[cfg(test)]
pub mod mocks {
    pub use super::status_sink::MockStatusSink;
    pub use super::status_sink::mock::RecordingSink;
    pub use super::timer_port::mock::ManualTimer;
    pub use super::transport_port::mock::RecordingTransport;
}
