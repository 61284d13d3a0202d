use std::time::Duration;

use tokio::task::AbortHandle;

/// Handle to a callback scheduled on a `SessionClock`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScheduleHandle(u64);

/// Runs delayed callbacks on the tokio timer, at most one outstanding.
///
/// Scheduling replaces (and cancels) whatever was pending. Dropping the clock
/// cancels the pending callback. Must be used from within a tokio runtime.
#[derive(Debug, Default)]
pub struct SessionClock {
    next_id: u64,
    pending: Option<(ScheduleHandle, AbortHandle)>,
}

impl SessionClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` after `delay`, cancelling any earlier schedule.
    pub fn schedule<F>(&mut self, delay: Duration, callback: F) -> ScheduleHandle
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel_pending();

        let handle = ScheduleHandle(self.next_id);
        self.next_id += 1;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        self.pending = Some((handle, task.abort_handle()));
        handle
    }

    /// Cancel `handle` if it is still the pending schedule.
    ///
    /// Returns `false` if the handle was already replaced or cancelled. A
    /// callback that has already run is unaffected.
    pub fn cancel(&mut self, handle: ScheduleHandle) -> bool {
        match &self.pending {
            Some((pending, _)) if *pending == handle => self.cancel_pending(),
            _ => false,
        }
    }

    /// Cancel whatever is pending. Returns `true` if something was.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some((_, task)) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    /// `true` while a scheduled callback has neither run nor been cancelled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|(_, task)| !task.is_finished())
    }
}

impl Drop for SessionClock {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
