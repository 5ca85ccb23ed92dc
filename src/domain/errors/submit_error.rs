//! Submission error types.

use thiserror::Error;

use super::{ScheduleError, TransportError};

/// Failure while sending a schedule over an open connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum SendError {
    #[error("serialization error: {message}")]
    Serialization { message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SendError {
    /// Creates serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Outcome of a rejected `submit` call.
///
/// Every variant has already been reported to the status sink by the time it
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ScheduleError),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error("not connected to server")]
    NotConnected,
}

impl SubmitError {
    /// Returns whether the schedule itself was invalid.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
