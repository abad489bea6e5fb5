//! # Listeners: event handlers invoked by the dispatcher.
//!
//! - [`Listener`]: the handler trait; [`ListenerRef`] is its shared handle.
//! - [`ListenerFn`]: closure-backed listener.
//! - [`BackgroundListener`]: defers a [`Process`] to a scheduler without halting.
//! - [`LogListener`]: traces every event (feature `logging`).
//!
//! ## Return values
//! ```text
//! handler returns ──► IntoOutcome ──► Outcome
//!   ()  / None / true  ─► Continue
//!   false              ─► Halt      (honored only when dispatching with halt = true)
//!   Err(ListenerError) ─► pass aborted, error returned to the caller
//! ```

mod background;
mod listener;
mod listener_fn;
#[cfg(feature = "logging")]
mod log;

pub use background::{BackgroundListener, Process, PROCESS_ID_PREFIX};
pub(crate) use listener::same_listener;
pub use listener::{
    IntoEventNames, IntoOutcome, Listener, ListenerRef, ListenerSource, Outcome, Payload,
};
pub use listener_fn::ListenerFn;
#[cfg(feature = "logging")]
pub use log::LogListener;
