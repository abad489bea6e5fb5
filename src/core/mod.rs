//! Dispatcher core: registries, patterns and dispatch.
//!
//! The public API from this module is [`Dispatcher`] together with its
//! [`DispatcherBuilder`] and [`DispatcherConfig`].
//!
//! Internal modules:
//! - [`pattern`]: wildcard pattern compilation and matching;
//! - [`registry`]: exact and wildcard listener stores;
//! - [`dispatcher`]: registration, resolution and the dispatch pass;
//! - [`builder`]: wiring of resolver and scheduler;
//! - [`config`]: dispatch defaults and background slot naming.

mod builder;
mod config;
mod dispatcher;
mod pattern;
mod registry;

pub use builder::DispatcherBuilder;
pub use config::{DispatcherConfig, SlotPolicy};
pub use dispatcher::Dispatcher;
