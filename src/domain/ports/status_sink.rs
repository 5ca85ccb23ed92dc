//! Status sink port definition.

use crate::domain::status::StatusMessage;

/// Display surface for connection status and the submit affordance.
#[cfg_attr(test, mockall::automock)]
pub trait StatusSink {
    /// Replaces the displayed status.
    fn set_status(&mut self, message: StatusMessage);

    /// Enables or disables the submit control.
    fn set_submit_enabled(&mut self, enabled: bool);
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Sink that keeps every status it was given.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        /// Statuses in emission order.
        pub history: Vec<StatusMessage>,
        /// Current submit affordance.
        pub submit_enabled: bool,
    }

    impl RecordingSink {
        /// Creates an empty sink with submission disabled.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the most recent status.
        pub fn last(&self) -> Option<&StatusMessage> {
            self.history.last()
        }
    }

    impl StatusSink for RecordingSink {
        fn set_status(&mut self, message: StatusMessage) {
            self.history.push(message);
        }

        fn set_submit_enabled(&mut self, enabled: bool) {
            self.submit_enabled = enabled;
        }
    }
}
