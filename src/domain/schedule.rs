//! Relay schedule value object.

use serde::{Deserialize, Serialize};

use super::errors::{ScheduleError, SendError};

/// ON/OFF time pair submitted to the server.
///
/// Both fields hold wall-clock time-of-day strings (`HH:MM`). Their content is
/// not parsed on the client; the server owns format validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Time at which the relay switches on.
    pub on_time: String,
    /// Time at which the relay switches off.
    pub off_time: String,
}

impl Schedule {
    /// Creates a schedule from raw input values.
    #[must_use]
    pub fn new(on_time: impl Into<String>, off_time: impl Into<String>) -> Self {
        Self {
            on_time: on_time.into(),
            off_time: off_time.into(),
        }
    }

    /// Checks that both times are present and distinct.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::MissingTime` if either field is empty and
    /// `ScheduleError::IdenticalTimes` if both fields are equal.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.on_time.is_empty() || self.off_time.is_empty() {
            return Err(ScheduleError::MissingTime);
        }

        if self.on_time == self.off_time {
            return Err(ScheduleError::IdenticalTimes);
        }

        Ok(())
    }

    /// Encodes the schedule as the JSON text frame sent to the server.
    ///
    /// # Errors
    ///
    /// Returns `SendError::Serialization` if encoding fails.
    pub fn to_wire(&self) -> Result<String, SendError> {
        serde_json::to_string(self).map_err(|e| SendError::serialization(e.to_string()))
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ON: {}, OFF: {}", self.on_time, self.off_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", "20:00", ScheduleError::MissingTime ; "missing_on_time")]
    #[test_case("08:00", "", ScheduleError::MissingTime ; "missing_off_time")]
    #[test_case("", "", ScheduleError::MissingTime ; "missing_both")]
    #[test_case("08:00", "08:00", ScheduleError::IdenticalTimes ; "identical_times")]
    fn test_validate_rejects(on: &str, off: &str, expected: ScheduleError) {
        assert_eq!(Schedule::new(on, off).validate(), Err(expected));
    }

    #[test]
    fn test_validate_accepts_overnight_schedule() {
        assert!(Schedule::new("22:00", "06:00").validate().is_ok());
    }

    #[test]
    fn test_wire_format() {
        let wire = Schedule::new("08:00", "20:00").to_wire().unwrap();
        assert_eq!(wire, r#"{"on_time":"08:00","off_time":"20:00"}"#);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Schedule::new("08:00", "20:00").to_string(),
            "ON: 08:00, OFF: 20:00"
        );
    }
}
