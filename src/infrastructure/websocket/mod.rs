mod connection;
mod constants;
mod events;
mod timer;

pub use connection::WebSocketTransport;
pub use events::{DriverEvent, DriverReceiver, DriverSender, driver_channel};
pub use timer::TokioTimer;
