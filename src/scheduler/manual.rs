//! # Manually driven scheduler.
//!
//! [`ManualScheduler`] keeps submitted tasks until the owner advances its
//! virtual clock. Each [`tick`](ManualScheduler::tick) runs the tasks that are due,
//! in submission order, without holding the internal lock (tasks may submit
//! more work, which becomes eligible on a later tick).
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use eventvisor::{ManualScheduler, Scheduler};
//!
//! let s = ManualScheduler::default();
//! s.schedule_after("a", Duration::ZERO, Box::new(|| println!("now"))).unwrap();
//! s.schedule_after("b", Duration::from_millis(50), Box::new(|| println!("later"))).unwrap();
//!
//! assert_eq!(s.tick(), 1);
//! assert_eq!(s.advance(Duration::from_millis(50)), 1);
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use parking_lot::Mutex;

use super::admission::Admission;
use super::scheduler::{ScheduledTask, Scheduler};
use super::slot::SlotTable;
use crate::error::ScheduleError;

struct Pending {
    due: Duration,
    task: ScheduledTask,
}

struct State {
    now: Duration,
    slots: SlotTable<Pending>,
}

/// Scheduler with a virtual clock advanced by the caller.
pub struct ManualScheduler {
    admission: Admission,
    state: Mutex<State>,
}

impl ManualScheduler {
    /// Creates a scheduler at virtual time zero.
    pub fn new(admission: Admission) -> Self {
        Self {
            admission,
            state: Mutex::new(State {
                now: Duration::ZERO,
                slots: SlotTable::new(),
            }),
        }
    }

    /// Runs every task whose due time has been reached. Returns how many ran.
    ///
    /// # Panics
    /// A panicking task does not stop the batch: the remaining due tasks still
    /// run, then the first panic is resumed.
    pub fn tick(&self) -> usize {
        let due = {
            let mut st = self.state.lock();
            let now = st.now;
            st.slots.drain_where(|p| p.due <= now)
        };

        let ran = due.len();
        let mut panicked = None;
        for (slot, _ticket, pending) in due {
            if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(pending.task)) {
                tracing::warn!(slot = %slot, "scheduled task panicked");
                panicked.get_or_insert(panic);
            }
        }
        if let Some(panic) = panicked {
            panic::resume_unwind(panic);
        }
        ran
    }

    /// Moves the virtual clock forward by `by`, then ticks.
    pub fn advance(&self, by: Duration) -> usize {
        self.state.lock().now += by;
        self.tick()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of tasks pending under `slot`.
    pub fn pending(&self, slot: &str) -> usize {
        self.state.lock().slots.pending(slot)
    }

    /// Number of tasks pending across all slots.
    pub fn len(&self) -> usize {
        self.state.lock().slots.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slot entries kept in the table, empty ones included.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.state.lock().slots.slot_count()
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(Admission::default())
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(
        &self,
        slot: &str,
        delay: Duration,
        task: ScheduledTask,
    ) -> Result<(), ScheduleError> {
        let admitted = {
            let mut st = self.state.lock();
            let due = st.now + delay;
            st.slots.admit(slot, self.admission, Pending { due, task })
        };
        if admitted.ticket.is_none() {
            tracing::trace!(slot, "slot busy, submission dropped");
        }
        Ok(())
    }

    fn cancel(&self, slot: &str) {
        // Task destructors run outside the lock.
        let dropped = self.state.lock().slots.cancel(slot);
        drop(dropped);
    }

    fn release(&self, slot: &str) {
        self.state.lock().slots.release(slot);
    }

    fn name(&self) -> &'static str {
        "manual"
    }
}
