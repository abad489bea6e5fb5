//! # Scheduler capability.
//!
//! [`Scheduler`] is the seam between the dispatcher and whatever drives
//! deferred work. Implementations decide when a submitted task runs and how a
//! reused slot name behaves (see [`Admission`](crate::Admission)).

use std::sync::{Arc, Weak};
use std::time::Duration;

use crate::error::ScheduleError;

/// Body of a deferred task.
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Shared handle to a scheduler.
pub type SchedulerRef = Arc<dyn Scheduler>;

/// # Runs tasks after a delay under a named slot.
///
/// ### Implementation requirements
/// - `schedule_after` must return without running `task`.
/// - `cancel` drops every task of the slot that has not started yet.
/// - `release` is called by a task body once it finished; it must not affect
///   tasks still pending under the same slot.
pub trait Scheduler: Send + Sync + 'static {
    /// Submits `task` to run once `delay` has elapsed.
    fn schedule_after(
        &self,
        slot: &str,
        delay: Duration,
        task: ScheduledTask,
    ) -> Result<(), ScheduleError>;

    /// Cancels pending work under `slot`.
    fn cancel(&self, slot: &str);

    /// Releases bookkeeping held for `slot`.
    fn release(&self, _slot: &str) {}

    /// Returns the scheduler name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Releases a slot when dropped, including on unwind.
///
/// Holds the scheduler weakly; nothing is released once the scheduler is gone.
pub(crate) struct SlotRelease {
    scheduler: Weak<dyn Scheduler>,
    slot: String,
}

impl SlotRelease {
    pub(crate) fn new(scheduler: &SchedulerRef, slot: impl Into<String>) -> Self {
        Self {
            scheduler: Arc::downgrade(scheduler),
            slot: slot.into(),
        }
    }

    pub(crate) fn slot(&self) -> &str {
        &self.slot
    }
}

impl Drop for SlotRelease {
    fn drop(&mut self) {
        if let Some(scheduler) = self.scheduler.upgrade() {
            scheduler.release(&self.slot);
        }
    }
}
