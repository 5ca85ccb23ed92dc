//! Domain error types.

mod schedule_error;
mod submit_error;
mod transport_error;

pub use schedule_error::ScheduleError;
pub use submit_error::{SendError, SubmitError};
pub use transport_error::TransportError;
