//! # eventvisor
//!
//! **Eventvisor** is a lightweight in-process event dispatcher for Rust.
//!
//! Listeners register for exact event names or `*` wildcard patterns; firing
//! an event invokes every matching listener in a deterministic order, either
//! synchronously or on a later scheduler tick. String references to listeners
//! and subscribers are resolved through an injected resolver.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  ListenerFn  │   │ "listeners.x"│   │  Subscriber  │
//!     │  (closure)   │   │ (identifier) │   │ (bulk table) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │                  ▼                  │
//!            │          ┌──────────────┐           │
//!            │          │   Resolver   │◄──────────┘ identifiers
//!            │          │ (Container)  │
//!            │          └──────┬───────┘
//!            ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Dispatcher                                                       │
//! │  - ExactRegistry     (name → ordered, duplicate-free listeners)   │
//! │  - WildcardRegistry  (pattern → ordered, duplicate-free listeners)│
//! │  - Scheduler         (background slot)                            │
//! └──────┬──────────────────────────────────────────────────┬─────────┘
//!        │ fire(event, payload, in_background = false)      │ in_background = true
//!        ▼                                                  ▼
//!   dispatch(event, payload, halt)              Scheduler::schedule_after(slot, 0, ..)
//!        │                                                  │ later tick
//!        ▼                                                  ▼
//!   wildcard matches ++ exact listeners  ◄──────── dispatch(event, payload, halt)
//! ```
//!
//! ### Dispatch pass
//! ```text
//! for listener in get_listeners(event) {      // snapshot, no lock held
//!   ├─ Ok(Continue)          ─► next
//!   ├─ Ok(Halt) && halt      ─► stop
//!   ├─ Ok(Halt) && !halt     ─► next
//!   └─ Err(ListenerError)    ─► stop, return the error
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits                              |
//! |-------------------|-----------------------------------------------------------------|-------------------------------------------------|
//! | **Dispatch**      | Register, forget, query and fire events.                        | [`Dispatcher`], [`DispatcherBuilder`]           |
//! | **Listeners**     | Handle events as closures, trait objects or background work.    | [`Listener`], [`ListenerFn`], [`BackgroundListener`] |
//! | **Subscribers**   | Register many listeners in one call.                            | [`Subscribe`], [`Subscriber`]                   |
//! | **Resolution**    | Turn string identifiers into listeners and subscribers.         | [`Resolver`], [`Container`], [`Binding`]        |
//! | **Scheduling**    | Defer dispatch to a later tick under a named slot.              | [`Scheduler`], [`TokioScheduler`], [`ManualScheduler`] |
//! | **Errors**        | Typed errors for registration, listeners and scheduling.        | [`EventError`], [`ListenerError`], [`ScheduleError`] |
//! | **Configuration** | Emit defaults and background slot policy.                       | [`DispatcherConfig`], [`SlotPolicy`]            |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogListener`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use eventvisor::{Container, Dispatcher, DispatcherConfig, ListenerFn, ListenerRef, Payload};
//!
//! fn main() -> Result<(), eventvisor::EventError> {
//!     // Bind listeners by identifier (optional)
//!     let ioc = Arc::new(Container::new());
//!     let audit: ListenerRef = ListenerFn::arc("audit", |event: &str, _: &Payload| {
//!         println!("audit: {event}");
//!     });
//!     ioc.singleton("listeners.audit", audit);
//!
//!     let dispatcher = Dispatcher::builder(DispatcherConfig::default())
//!         .with_resolver(ioc)
//!         .build();
//!
//!     // A guard that stops propagation for cancelled orders
//!     let guard: ListenerRef = ListenerFn::arc("guard", |event: &str, _: &Payload| {
//!         event != "order.cancelled"
//!     });
//!
//!     dispatcher.listen("order.*", guard)?;
//!     dispatcher.listen(["order.created", "order.cancelled"], "listeners.audit")?;
//!
//!     dispatcher.emit("order.created", json!({"id": 1}))?;   // guard, audit
//!     dispatcher.emit("order.cancelled", json!({"id": 1}))?; // guard only
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod listeners;
mod resolver;
mod scheduler;
mod subscribers;

// ---- Public re-exports ----

pub use core::{Dispatcher, DispatcherBuilder, DispatcherConfig, SlotPolicy};
pub use error::{EventError, ListenerError, ScheduleError};
pub use listeners::{
    BackgroundListener, IntoEventNames, IntoOutcome, Listener, ListenerFn, ListenerRef,
    ListenerSource, Outcome, Payload, Process, PROCESS_ID_PREFIX,
};
pub use resolver::{Binding, Container, Resolver, ResolverRef};
pub use scheduler::{Admission, ManualScheduler, ScheduledTask, Scheduler, SchedulerRef, TokioScheduler};
pub use subscribers::{Subscribe, Subscriber, SubscriberRef, SubscriberSource};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogListener;
