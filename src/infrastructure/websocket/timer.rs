use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use super::events::{DriverEvent, DriverSender};
use crate::domain::connection::TimerHandle;
use crate::domain::ports::TimerPort;

/// `TimerPort` backed by spawned tokio sleeps.
pub struct TokioTimer {
    event_tx: DriverSender,
    next_handle: u64,
    timers: HashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioTimer {
    #[must_use]
    pub fn new(event_tx: DriverSender) -> Self {
        Self {
            event_tx,
            next_handle: 0,
            timers: HashMap::new(),
        }
    }

    /// Number of timers that have neither fired nor been cancelled.
    #[cfg(test)]
    fn pending(&self) -> usize {
        self.timers
            .values()
            .filter(|task| !task.is_finished())
            .count()
    }
}

impl TimerPort for TokioTimer {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.timers.retain(|_, task| !task.is_finished());

        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let event_tx = self.event_tx.clone();
        let task = tokio::spawn(async move {
            sleep(delay).await;
            if event_tx.send(DriverEvent::TimerFired(handle)).is_err() {
                debug!(?handle, "Driver channel closed, timer dropped");
            }
        });

        self.timers.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.timers.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for task in self.timers.values() {
            task.abort();
        }
    }
}
