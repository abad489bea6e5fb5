//! # Background listener.
//!
//! [`BackgroundListener`] defers its work to a [`Scheduler`](crate::Scheduler)
//! and never halts propagation: `handle` submits [`Process::process`] under the
//! listener's own slot (`process_id`) after `process_delay` and returns
//! [`Outcome::Continue`] immediately.
//!
//! ```text
//! handle(event, payload)
//!     ├─► scheduler.schedule_after(process_id, process_delay, {
//!     │       process(event, payload)   errors are logged
//!     │       release(process_id)
//!     │   })
//!     └─► Ok(Continue)
//! ```
//!
//! Repeated events hitting the same listener before it runs interact through
//! the scheduler's [`Admission`](crate::Admission): the default `Replace`
//! keeps only the latest.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ListenerError;
use crate::listeners::listener::{Listener, Outcome, Payload};
use crate::scheduler::{SchedulerRef, SlotRelease};

/// Prefix of generated process ids.
pub const PROCESS_ID_PREFIX: &str = "BackgroundListener._";

static PROCESS_SEQ: AtomicU64 = AtomicU64::new(0);

/// Work performed by a [`BackgroundListener`] off the dispatch path.
pub trait Process: Send + Sync + 'static {
    /// Processes one event. Errors are logged, never returned to the dispatcher.
    fn process(&self, event: &str, payload: &Payload) -> Result<(), ListenerError>;
}

/// Listener that processes events on a later scheduler tick.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use serde_json::json;
/// use eventvisor::{
///     BackgroundListener, Dispatcher, ListenerError, ListenerRef, ManualScheduler, Payload,
///     Process, SchedulerRef,
/// };
///
/// struct Indexer;
///
/// impl Process for Indexer {
///     fn process(&self, _event: &str, _payload: &Payload) -> Result<(), ListenerError> {
///         Ok(())
///     }
/// }
///
/// let scheduler = Arc::new(ManualScheduler::default());
/// let indexer: ListenerRef = Arc::new(BackgroundListener::new(
///     Indexer,
///     Arc::clone(&scheduler) as SchedulerRef,
/// ));
///
/// let dispatcher = Dispatcher::builder(Default::default()).build();
/// dispatcher.listen("doc.*", indexer).unwrap();
/// dispatcher.emit("doc.saved", json!({"id": 3})).unwrap();
///
/// assert_eq!(scheduler.tick(), 1);
/// ```
pub struct BackgroundListener<P> {
    process: Arc<P>,
    scheduler: SchedulerRef,
    process_id: String,
    process_delay: Duration,
}

impl<P: Process> BackgroundListener<P> {
    /// Creates a listener with a generated process id and zero delay.
    pub fn new(process: P, scheduler: SchedulerRef) -> Self {
        let seq = PROCESS_SEQ.fetch_add(1, Ordering::Relaxed);
        let ty = std::any::type_name::<P>();
        let short = ty.rsplit("::").next().unwrap_or(ty);

        Self {
            process: Arc::new(process),
            scheduler,
            process_id: format!("{PROCESS_ID_PREFIX}{short}({seq})"),
            process_delay: Duration::ZERO,
        }
    }

    /// Sets the delay before `process` runs.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.process_delay = delay;
        self
    }

    /// Sets the scheduler slot used for processing.
    #[must_use]
    pub fn with_process_id(mut self, id: impl Into<String>) -> Self {
        self.process_id = id.into();
        self
    }

    /// Returns the scheduler slot used for processing.
    pub fn process_id(&self) -> &str {
        &self.process_id
    }

    /// Returns the delay before `process` runs.
    pub fn process_delay(&self) -> Duration {
        self.process_delay
    }

    /// Returns the wrapped process.
    pub fn process(&self) -> &P {
        &self.process
    }
}

impl<P: Process> Listener for BackgroundListener<P> {
    fn handle(&self, event: &str, payload: &Payload) -> Result<Outcome, ListenerError> {
        let process = Arc::clone(&self.process);
        let release = SlotRelease::new(&self.scheduler, self.process_id.as_str());
        let event = event.to_string();
        let payload = payload.clone();

        self.scheduler
            .schedule_after(
                &self.process_id,
                self.process_delay,
                Box::new(move || {
                    let release = release;
                    if let Err(e) = process.process(&event, &payload) {
                        tracing::warn!(
                            event = %event,
                            process_id = release.slot(),
                            error = %e,
                            label = e.as_label(),
                            "background process failed"
                        );
                    }
                }),
            )
            .map_err(|e| ListenerError::fail(e.to_string()))?;

        Ok(Outcome::Continue)
    }

    fn name(&self) -> &str {
        &self.process_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    use crate::scheduler::{ManualScheduler, TokioScheduler};

    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<(String, Payload)>>,
    }

    impl Process for Recording {
        fn process(&self, event: &str, payload: &Payload) -> Result<(), ListenerError> {
            self.seen.lock().push((event.to_string(), payload.clone()));
            Ok(())
        }
    }

    struct Failing;

    impl Process for Failing {
        fn process(&self, _: &str, _: &Payload) -> Result<(), ListenerError> {
            Err(ListenerError::fail("broken"))
        }
    }

    fn manual() -> Arc<ManualScheduler> {
        Arc::new(ManualScheduler::default())
    }

    #[test]
    fn test_default_process_id() {
        let a = BackgroundListener::new(Recording::default(), manual());
        let b = BackgroundListener::new(Recording::default(), manual());

        assert!(a.process_id().starts_with("BackgroundListener._Recording("));
        assert_ne!(a.process_id(), b.process_id());
        assert_eq!(a.process_delay(), Duration::ZERO);
        assert_eq!(a.name(), a.process_id());
    }

    #[test]
    fn test_handle_defers_and_continues() {
        let scheduler = manual();
        let l = BackgroundListener::new(Recording::default(), scheduler.clone());

        let outcome = l.handle("doc.saved", &json!({"id": 1})).unwrap();
        assert_eq!(outcome, Outcome::Continue);
        assert!(l.process().seen.lock().is_empty());

        assert_eq!(scheduler.tick(), 1);
        assert_eq!(
            *l.process().seen.lock(),
            vec![("doc.saved".to_string(), json!({"id": 1}))]
        );
    }

    #[test]
    fn test_delay_is_respected() {
        let scheduler = manual();
        let l = BackgroundListener::new(Recording::default(), scheduler.clone())
            .with_delay(Duration::from_millis(50))
            .with_process_id("indexer");

        l.handle("e", &json!({})).unwrap();
        assert_eq!(scheduler.pending("indexer"), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(20)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(30)), 1);
        assert_eq!(l.process().seen.lock().len(), 1);
    }

    #[test]
    fn test_repeated_events_are_replaced() {
        let scheduler = manual();
        let l = BackgroundListener::new(Recording::default(), scheduler.clone());

        l.handle("e", &json!(1)).unwrap();
        l.handle("e", &json!(2)).unwrap();
        scheduler.tick();

        assert_eq!(*l.process().seen.lock(), vec![("e".to_string(), json!(2))]);
    }

    #[test]
    fn test_process_error_is_contained() {
        let scheduler = manual();
        let l = BackgroundListener::new(Failing, scheduler.clone());

        assert!(l.handle("e", &json!({})).is_ok());
        assert_eq!(scheduler.tick(), 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_slot_released_after_failure() {
        let scheduler = manual();
        let l = BackgroundListener::new(Failing, scheduler.clone());

        l.handle("e", &json!({})).unwrap();
        assert_eq!(scheduler.slot_count(), 1);
        scheduler.tick();
        assert_eq!(scheduler.slot_count(), 0);
    }

    #[test]
    fn test_submission_failure_is_listener_error() {
        let l = BackgroundListener::new(Recording::default(), Arc::new(TokioScheduler::default()));
        let err = l.handle("e", &json!({})).unwrap_err();
        assert_eq!(err.as_label(), "listener_failed");
    }
}
