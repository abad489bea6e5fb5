//! # Deferred execution under named slots.
//!
//! Background dispatch never runs listeners itself: it hands a task to a
//! [`Scheduler`] under a slot name and returns. What happens when a slot is
//! reused before its task ran is the scheduler's [`Admission`] policy.
//!
//! ## Contents
//! - [`Scheduler`] the capability consumed by the dispatcher
//! - [`Admission`] replace / queue / drop-if-pending policy per slot
//! - [`TokioScheduler`] runs tasks on a tokio runtime
//! - [`ManualScheduler`] virtual clock, advanced explicitly (tests, single-threaded hosts)

mod admission;
mod manual;
mod runtime;
mod scheduler;
mod slot;

pub use admission::Admission;
pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;
pub(crate) use scheduler::SlotRelease;
pub use scheduler::{ScheduledTask, Scheduler, SchedulerRef};
