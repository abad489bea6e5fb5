//! # Tokio-backed scheduler.
//!
//! [`TokioScheduler`] spawns one tokio task per accepted submission.
//!
//! ## Architecture
//! ```text
//! schedule_after(slot, delay, task)
//!     │
//!     ├─► SlotTable::admit(slot, admission)   (Replace cancels pending tokens)
//!     └─► tokio::spawn ──► sleep(delay) (cancellable)
//!                          └─► claim ticket ──► task()
//! ```
//!
//! ## Rules
//! - A task runs only if it still owns its ticket when the delay elapses.
//! - Zero delay skips the timer; the task runs on the runtime's next poll.
//! - `cancel(slot)` wakes and drops every pending task of the slot.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use super::admission::Admission;
use super::scheduler::{ScheduledTask, Scheduler};
use super::slot::SlotTable;
use crate::error::ScheduleError;

/// Scheduler running deferred tasks on a tokio runtime.
///
/// Cheap to clone; clones share the same slot table.
#[derive(Clone)]
pub struct TokioScheduler {
    admission: Admission,
    handle: Option<Handle>,
    slots: Arc<Mutex<SlotTable<CancellationToken>>>,
}

impl TokioScheduler {
    /// Creates a scheduler using the ambient runtime at submission time.
    pub fn new(admission: Admission) -> Self {
        Self {
            admission,
            handle: None,
            slots: Arc::new(Mutex::new(SlotTable::new())),
        }
    }

    /// Creates a scheduler bound to an explicit runtime handle.
    pub fn with_handle(admission: Admission, handle: Handle) -> Self {
        Self {
            handle: Some(handle),
            ..Self::new(admission)
        }
    }

    /// Returns the admission policy applied to reused slots.
    pub fn admission(&self) -> Admission {
        self.admission
    }

    /// Number of tasks pending under `slot`.
    pub fn pending(&self, slot: &str) -> usize {
        self.slots.lock().pending(slot)
    }

    fn runtime(&self, slot: &str) -> Result<Handle, ScheduleError> {
        match &self.handle {
            Some(h) => Ok(h.clone()),
            None => Handle::try_current().map_err(|_| ScheduleError::NoRuntime {
                slot: slot.to_string(),
            }),
        }
    }
}

impl Default for TokioScheduler {
    /// Ambient runtime, [`Admission::Replace`].
    fn default() -> Self {
        Self::new(Admission::default())
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(
        &self,
        slot: &str,
        delay: Duration,
        task: ScheduledTask,
    ) -> Result<(), ScheduleError> {
        let rt = self.runtime(slot)?;
        let token = CancellationToken::new();

        let admitted = self.slots.lock().admit(slot, self.admission, token.clone());
        for evicted in admitted.evicted {
            evicted.cancel();
        }
        let Some(ticket) = admitted.ticket else {
            tracing::trace!(slot, "slot busy, submission dropped");
            return Ok(());
        };

        let slots = Arc::clone(&self.slots);
        let slot = slot.to_string();
        rt.spawn(async move {
            if !delay.is_zero() {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            let claimed = slots.lock().take(&slot, ticket).is_some();
            if claimed {
                task();
            }
        });
        Ok(())
    }

    fn cancel(&self, slot: &str) {
        for token in self.slots.lock().cancel(slot) {
            token.cancel();
        }
    }

    fn release(&self, slot: &str) {
        self.slots.lock().release(slot);
    }

    fn name(&self) -> &'static str {
        "tokio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(counter: &Arc<AtomicUsize>) -> ScheduledTask {
        let c = Arc::clone(counter);
        Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_runs_after_yield() {
        let s = TokioScheduler::default();
        let n = Arc::new(AtomicUsize::new(0));

        s.schedule_after("slot", Duration::ZERO, counting(&n)).unwrap();
        assert_eq!(n.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(n.load(Ordering::SeqCst), 1);
        assert_eq!(s.pending("slot"), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_replace_keeps_latest() {
        let s = TokioScheduler::new(Admission::Replace);
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        s.schedule_after("slot", Duration::ZERO, counting(&first)).unwrap();
        s.schedule_after("slot", Duration::ZERO, counting(&second)).unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_queue_runs_all() {
        let s = TokioScheduler::new(Admission::Queue);
        let n = Arc::new(AtomicUsize::new(0));

        s.schedule_after("slot", Duration::ZERO, counting(&n)).unwrap();
        s.schedule_after("slot", Duration::ZERO, counting(&n)).unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(n.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_drop_if_pending_keeps_first() {
        let s = TokioScheduler::new(Admission::DropIfPending);
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        s.schedule_after("slot", Duration::ZERO, counting(&first)).unwrap();
        s.schedule_after("slot", Duration::ZERO, counting(&second)).unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_cancel_drops_delayed_task() {
        let s = TokioScheduler::default();
        let n = Arc::new(AtomicUsize::new(0));

        s.schedule_after("slot", Duration::from_millis(20), counting(&n)).unwrap();
        assert_eq!(s.pending("slot"), 1);
        s.cancel("slot");

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(n.load(Ordering::SeqCst), 0);
        assert_eq!(s.pending("slot"), 0);
    }

    #[test]
    fn test_no_runtime() {
        let s = TokioScheduler::default();
        let err = s
            .schedule_after("slot", Duration::ZERO, Box::new(|| {}))
            .unwrap_err();
        assert_eq!(err, ScheduleError::NoRuntime { slot: "slot".into() });
    }
}
