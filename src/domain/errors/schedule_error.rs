//! Schedule validation error types.

use thiserror::Error;

/// Reasons a schedule is rejected before sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ScheduleError {
    #[error("Please select both ON and OFF times.")]
    MissingTime,

    #[error("ON time and OFF time cannot be the same.")]
    IdenticalTimes,
}
