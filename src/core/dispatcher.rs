//! # Dispatcher: registration and dispatch.
//!
//! [`Dispatcher`] owns one exact registry and one wildcard registry, plus the
//! injected [`Resolver`](crate::Resolver) and [`Scheduler`](crate::Scheduler).
//!
//! ## Dispatch pass
//! ```text
//! dispatch(event, payload, halt)
//!     │
//!     ├─► get_listeners(event)   wildcard matches (pattern order) ++ exact listeners
//!     └─► for listener in snapshot:
//!            ├─ Err(e)              ─► return Err(e)  (remaining listeners skipped)
//!            ├─ Halt && halt        ─► stop
//!            └─ Continue / !halt    ─► next
//! ```
//!
//! ## Background fire
//! ```text
//! fire(event, payload, in_background = true, halt)
//!     └─► scheduler.schedule_after(slot, 0, { dispatch(event, payload, halt); release(slot) })
//!         returns immediately
//! ```
//!
//! ## Rules
//! - Listener references are resolved and type-checked at `listen` time.
//! - No lock is held while a listener runs; listeners may `listen`/`forget` re-entrantly.
//! - A pending background dispatch reads the registries when it runs, not when it was fired.
//! - A background dispatch whose dispatcher was dropped does nothing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use super::builder::DispatcherBuilder;
use super::config::{DispatcherConfig, SlotPolicy};
use super::pattern::is_wildcard;
use super::registry::{ExactRegistry, WildcardRegistry};
use crate::error::{EventError, ListenerError};
use crate::listeners::{IntoEventNames, ListenerRef, ListenerSource, Payload};
use crate::resolver::{Binding, ResolverRef};
use crate::scheduler::{SchedulerRef, SlotRelease};
use crate::subscribers::{SubscriberRef, SubscriberSource};

struct Inner {
    cfg: DispatcherConfig,
    slot: String,
    fires: AtomicU64,
    listeners: RwLock<ExactRegistry>,
    wildcards: RwLock<WildcardRegistry>,
    resolver: Option<ResolverRef>,
    scheduler: SchedulerRef,
}

/// In-process event dispatcher.
///
/// Cheap to clone; clones share registries and collaborators.
///
/// # Example
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use serde_json::json;
/// use eventvisor::{Dispatcher, ListenerFn, ListenerRef, Payload};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let log = Arc::clone(&seen);
/// let l: ListenerRef = ListenerFn::arc("orders", move |event: &str, payload: &Payload| {
///     log.lock().unwrap().push(format!("{event} {payload}"));
/// });
///
/// let dispatcher = Dispatcher::builder(Default::default()).build();
/// dispatcher.listen("order.*", l).unwrap();
/// dispatcher.fire("order.created", json!({"id": 1}), false, true).unwrap();
///
/// assert_eq!(*seen.lock().unwrap(), vec![r#"order.created {"id":1}"#.to_string()]);
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

impl Dispatcher {
    /// Returns a builder for a dispatcher with the given configuration.
    pub fn builder(cfg: DispatcherConfig) -> DispatcherBuilder {
        DispatcherBuilder::new(cfg)
    }

    /// Creates a dispatcher with default configuration and the given collaborators.
    pub fn new(resolver: ResolverRef, scheduler: SchedulerRef) -> Self {
        Self::new_internal(DispatcherConfig::default(), Some(resolver), scheduler)
    }

    pub(super) fn new_internal(
        cfg: DispatcherConfig,
        resolver: Option<ResolverRef>,
        scheduler: SchedulerRef,
    ) -> Self {
        let slot = cfg.resolve_slot();
        Self {
            inner: Arc::new(Inner {
                cfg,
                slot,
                fires: AtomicU64::new(0),
                listeners: RwLock::new(ExactRegistry::default()),
                wildcards: RwLock::new(WildcardRegistry::default()),
                resolver,
                scheduler,
            }),
        }
    }

    /// Returns the configuration the dispatcher was built with.
    pub fn config(&self) -> &DispatcherConfig {
        &self.inner.cfg
    }

    /// Returns the scheduler slot used for background dispatch.
    pub fn slot(&self) -> &str {
        &self.inner.slot
    }

    /// Registers `listener` for one or more events.
    ///
    /// Names containing `*` are stored as wildcard patterns, others as exact
    /// names. Registering a listener that is already present for a name is a
    /// no-op for that name. Names are processed in order; the first
    /// resolution error stops the call and is returned.
    pub fn listen<E, L>(&self, events: E, listener: L) -> Result<(), EventError>
    where
        E: IntoEventNames,
        L: Into<ListenerSource>,
    {
        let source = listener.into();
        for event in events.into_event_names() {
            let listener = self.make_listener(&source)?;
            let wildcard = is_wildcard(&event);

            let added = if wildcard {
                self.inner
                    .wildcards
                    .write()
                    .insert(&event, listener)
                    .map_err(|e| EventError::InvalidPattern {
                        pattern: event.clone(),
                        error: e.to_string(),
                    })?
            } else {
                self.inner.listeners.write().insert(&event, listener)
            };

            tracing::debug!(
                event = %event,
                listener = source.describe(),
                wildcard,
                added,
                "listen"
            );
        }
        Ok(())
    }

    /// Resolves `subscriber` and lets it register its listeners.
    pub fn subscribe<S>(&self, subscriber: S) -> Result<(), EventError>
    where
        S: Into<SubscriberSource>,
    {
        let source = subscriber.into();
        let subscriber = self.make_subscriber(&source)?;
        tracing::debug!(subscriber = subscriber.name(), "subscribe");
        subscriber.subscribe(self)
    }

    /// Dispatches `event` with the defaults from [`DispatcherConfig`]
    /// (`background = false`, `halt = true` unless configured otherwise).
    pub fn emit(&self, event: &str, payload: Payload) -> Result<(), EventError> {
        let cfg = &self.inner.cfg;
        self.fire(event, payload, cfg.background, cfg.halt)
    }

    /// Dispatches `event` now, or on a later scheduler tick when `in_background` is set.
    ///
    /// - Synchronous: the first listener error is returned as [`EventError::Listener`].
    /// - Background: returns once the task is submitted; listener errors are logged
    ///   when the task runs. Only submission failures are returned.
    pub fn fire(
        &self,
        event: &str,
        payload: Payload,
        in_background: bool,
        halt: bool,
    ) -> Result<(), EventError> {
        if !in_background {
            return self.dispatch(event, &payload, halt).map_err(EventError::from);
        }

        let slot = self.background_slot();
        let weak = Arc::downgrade(&self.inner);
        let event = event.to_string();
        let release = SlotRelease::new(&self.inner.scheduler, slot.as_str());

        tracing::debug!(event = %event, slot = %slot, halt, "background fire");

        self.inner.scheduler.schedule_after(
            &slot,
            Duration::ZERO,
            Box::new(move || {
                // Slot is released on every exit, unwinding included.
                let release = release;
                let Some(inner) = weak.upgrade() else {
                    tracing::warn!(event = %event, slot = release.slot(), "dispatcher dropped before background dispatch");
                    return;
                };
                let dispatcher = Dispatcher { inner };
                if let Err(e) = dispatcher.dispatch(&event, &payload, halt) {
                    tracing::warn!(
                        event = %event,
                        slot = release.slot(),
                        error = %e,
                        label = e.as_label(),
                        "background dispatch failed"
                    );
                }
            }),
        )?;
        Ok(())
    }

    /// Invokes every listener matching `event`, in order.
    ///
    /// With `halt`, the pass stops at the first listener returning
    /// [`Outcome::Halt`](crate::Outcome::Halt). A listener error stops the pass
    /// and is returned unchanged.
    pub fn dispatch(&self, event: &str, payload: &Payload, halt: bool) -> Result<(), ListenerError> {
        let listeners = self.get_listeners(event);

        for listener in &listeners {
            tracing::trace!(event, listener = listener.name(), "invoke");
            let outcome = listener.handle(event, payload)?;

            if halt && outcome.is_halt() {
                tracing::debug!(event, listener = listener.name(), "dispatch halted");
                break;
            }
        }
        Ok(())
    }

    /// Removes every listener registered under `event` (exact name or wildcard pattern).
    ///
    /// Already scheduled background dispatches are not cancelled.
    pub fn forget(&self, event: &str) {
        let removed = if is_wildcard(event) {
            self.inner.wildcards.write().forget(event)
        } else {
            self.inner.listeners.write().forget(event)
        };
        tracing::debug!(event, removed, "forget");
    }

    /// Returns `true` if dispatching `event` would invoke at least one listener.
    pub fn has_listeners(&self, event: &str) -> bool {
        self.inner.listeners.read().has_listeners(event)
            || self.inner.wildcards.read().has_listeners(event)
    }

    /// Returns the listeners matching `event`: wildcard listeners first (in
    /// pattern registration order), then exact listeners.
    pub fn get_listeners(&self, event: &str) -> Vec<ListenerRef> {
        let mut out = Vec::new();
        self.inner.wildcards.read().collect_into(event, &mut out);
        self.inner.listeners.read().collect_into(event, &mut out);
        out
    }

    fn background_slot(&self) -> String {
        match self.inner.cfg.slot_policy {
            SlotPolicy::Shared => self.inner.slot.clone(),
            SlotPolicy::PerFire => {
                let n = self.inner.fires.fetch_add(1, Ordering::Relaxed);
                format!("{}#{n}", self.inner.slot)
            }
        }
    }

    fn resolve(&self, id: &str) -> Result<Binding, EventError> {
        match &self.inner.resolver {
            Some(resolver) => resolver.resolve(id),
            None => Err(EventError::UnresolvedIdentifier { id: id.to_string() }),
        }
    }

    fn make_listener(&self, source: &ListenerSource) -> Result<ListenerRef, EventError> {
        let id = match source {
            ListenerSource::Listener(listener) => return Ok(Arc::clone(listener)),
            ListenerSource::Id(id) => id,
        };

        match self.resolve(id)? {
            Binding::Listener(listener) => Ok(listener),
            other => {
                tracing::debug!(id = %id, kind = other.kind(), "not a listener");
                Err(EventError::InvalidListener {
                    reference: id.clone(),
                })
            }
        }
    }

    fn make_subscriber(&self, source: &SubscriberSource) -> Result<SubscriberRef, EventError> {
        let id = match source {
            SubscriberSource::Subscriber(subscriber) => return Ok(Arc::clone(subscriber)),
            SubscriberSource::Id(id) => id,
        };

        match self.resolve(id)? {
            Binding::Subscriber(subscriber) => Ok(subscriber),
            other => {
                tracing::debug!(id = %id, kind = other.kind(), "not a subscriber");
                Err(EventError::InvalidSubscriber {
                    reference: id.clone(),
                })
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("slot", &self.inner.slot)
            .field("scheduler", &self.inner.scheduler.name())
            .field("resolver", &self.inner.resolver.is_some())
            .finish()
    }
}
