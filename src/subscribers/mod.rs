//! # Bulk listener registration.
//!
//! A subscriber registers several listeners with a dispatcher in one call.
//!
//! ## Architecture
//! ```text
//! Dispatcher::subscribe(source)
//!     │
//!     ├─► Id(name) ──► Resolver::resolve(name) ──► Binding::Subscriber(sub)
//!     │                                            └─► other → InvalidSubscriber
//!     └─► sub.subscribe(&dispatcher)
//!              └─► for (event, refs) in table: dispatcher.listen(event, ref)
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use eventvisor::{Dispatcher, EventError, Subscribe};
//!
//! struct Billing;
//!
//! impl Subscribe for Billing {
//!     fn subscribe(&self, dispatcher: &Dispatcher) -> Result<(), EventError> {
//!         dispatcher.listen("invoice.*", "listeners.ledger")?;
//!         dispatcher.listen(["order.paid", "order.refunded"], "listeners.mailer")
//!     }
//!
//!     fn name(&self) -> &str { "billing" }
//! }
//! ```

mod subscriber;
mod table;

pub use subscriber::{Subscribe, SubscriberRef, SubscriberSource};
pub use table::Subscriber;
