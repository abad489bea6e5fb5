//! # Dispatcher configuration.
//!
//! Provides [`DispatcherConfig`], the settings consumed by
//! [`Dispatcher::builder`](crate::Dispatcher::builder).
//!
//! ## Background slot
//! Background dispatch submits its task to the scheduler under a slot name.
//! [`SlotPolicy`] controls whether all background fires of one dispatcher
//! share that slot (and so interact through the scheduler's
//! [`Admission`](crate::Admission)) or each get their own.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of per-instance slot names.
static DISPATCHER_SEQ: AtomicU64 = AtomicU64::new(0);

/// How background fires map onto scheduler slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotPolicy {
    /// Every background fire reuses the dispatcher's slot.
    ///
    /// With [`Admission::Replace`](crate::Admission::Replace) a fire that has
    /// not run yet is superseded by the next one (coalescing).
    #[default]
    Shared,

    /// Each background fire gets a slot of its own (`<slot>#<n>`).
    ///
    /// Background fires never affect each other.
    PerFire,
}

/// Configuration for a [`Dispatcher`](crate::Dispatcher).
///
/// ## Field semantics
/// - `slot`: background slot name (`None` = derived, unique per dispatcher)
/// - `slot_policy`: shared slot or one slot per background fire
/// - `background`: whether [`emit`](crate::Dispatcher::emit) defers delivery
/// - `halt`: whether [`emit`](crate::Dispatcher::emit) stops on the first `Halt`
#[derive(Clone, Debug)]
pub struct DispatcherConfig {
    /// Scheduler slot used for background dispatch.
    pub slot: Option<String>,

    /// Mapping of background fires onto slots.
    pub slot_policy: SlotPolicy,

    /// Default `in_background` for `emit`.
    pub background: bool,

    /// Default `halt` for `emit`.
    pub halt: bool,
}

impl DispatcherConfig {
    /// Returns the configured slot, or a fresh one scoped to a new dispatcher instance.
    pub(crate) fn resolve_slot(&self) -> String {
        match &self.slot {
            Some(slot) => slot.clone(),
            None => {
                let n = DISPATCHER_SEQ.fetch_add(1, Ordering::Relaxed);
                format!("eventvisor.dispatcher.{n}.dispatching")
            }
        }
    }
}

impl Default for DispatcherConfig {
    /// Default configuration:
    ///
    /// - `slot = None` (derived per dispatcher)
    /// - `slot_policy = SlotPolicy::Shared`
    /// - `background = false`
    /// - `halt = true`
    fn default() -> Self {
        Self {
            slot: None,
            slot_policy: SlotPolicy::default(),
            background: false,
            halt: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_slots_are_unique() {
        let cfg = DispatcherConfig::default();
        let a = cfg.resolve_slot();
        let b = cfg.resolve_slot();
        assert_ne!(a, b);
        assert!(a.starts_with("eventvisor.dispatcher."));
    }

    #[test]
    fn test_explicit_slot_is_kept() {
        let cfg = DispatcherConfig {
            slot: Some("jobs".into()),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_slot(), "jobs");
    }
}
