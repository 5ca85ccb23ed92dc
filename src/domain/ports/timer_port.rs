//! Timer port definition.

use std::time::Duration;

use crate::domain::connection::TimerHandle;

/// Port for cancellable one-shot timers.
///
/// A scheduled timer reports back with its handle once `delay` has elapsed,
/// unless it was cancelled first.
pub trait TimerPort {
    /// Schedules a timer.
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Cancels a timer. Already fired or unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Timer that only records schedule and cancel calls.
    #[derive(Debug, Default)]
    pub struct ManualTimer {
        next_handle: u64,
        /// Every timer ever scheduled, with its delay.
        pub scheduled: Vec<(TimerHandle, Duration)>,
        /// Handles passed to `cancel`.
        pub cancelled: Vec<TimerHandle>,
    }

    impl ManualTimer {
        /// Creates an empty timer.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns handles scheduled and not yet cancelled.
        pub fn pending(&self) -> Vec<TimerHandle> {
            self.scheduled
                .iter()
                .map(|(handle, _)| *handle)
                .filter(|handle| !self.cancelled.contains(handle))
                .collect()
        }
    }

    impl TimerPort for ManualTimer {
        fn schedule(&mut self, delay: Duration) -> TimerHandle {
            let handle = TimerHandle(self.next_handle);
            self.next_handle += 1;
            self.scheduled.push((handle, delay));
            handle
        }

        fn cancel(&mut self, handle: TimerHandle) {
            self.cancelled.push(handle);
        }
    }
}
