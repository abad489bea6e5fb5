//! # Per-slot admission policy
//!
//! Schedulers treat deferred tasks as **slots** identified by name.
//! When a new task is submitted for a slot that still has pending work,
//! the admission policy decides what to do.
//!
//! ## Variants
//! - `Replace`: **Cancel** the pending task(s) and keep only the new one.
//! - `Queue`: **Keep** the pending task(s); the new one runs as well.
//! - `DropIfPending`: **Ignore** the new task while the slot has pending work.
//!
//! ## Invariants
//! - A task that already started is never affected by later submissions.
//! - Under `Replace` at most one task is pending per slot.

/// Policy controlling how submissions are handled when a slot is busy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Admission {
    /// Cancel pending work and keep the latest submission.
    ///
    /// Use when:
    /// - Only the latest state matters
    /// - Example: coalescing a burst of background fires into one dispatch
    #[default]
    Replace,

    /// Run every submission.
    ///
    /// Use when:
    /// - No submission may be lost
    /// - Example: each background fire carries a distinct payload
    Queue,

    /// Skip the new submission if work is already pending.
    ///
    /// Use when:
    /// - The first request wins
    /// - Example: debounced refresh
    DropIfPending,
}
