//! # Table-driven subscriber.
//!
//! [`Subscriber`] holds an ordered `event → [listener]` table and feeds it
//! through [`Dispatcher::listen`](crate::Dispatcher::listen) pair by pair, in
//! table order and then listener order.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use eventvisor::{Container, Dispatcher, ListenerFn, ListenerRef, Payload, Subscriber, SubscriberRef};
//!
//! let ioc = Arc::new(Container::new());
//! let mailer: ListenerRef = ListenerFn::arc("mailer", |_: &str, _: &Payload| {});
//! ioc.singleton("listeners.mailer", mailer);
//!
//! let dispatcher = Dispatcher::builder(Default::default())
//!     .with_resolver(ioc)
//!     .build();
//!
//! let orders: SubscriberRef = Arc::new(
//!     Subscriber::named("orders")
//!         .on("order.created", "listeners.mailer")
//!         .on("order.*", "listeners.mailer"),
//! );
//! dispatcher.subscribe(orders).unwrap();
//!
//! assert_eq!(dispatcher.get_listeners("order.created").len(), 2);
//! ```

use std::borrow::Cow;

use crate::core::Dispatcher;
use crate::error::EventError;
use crate::listeners::ListenerSource;
use crate::subscribers::Subscribe;

/// Ordered event → listeners table.
#[derive(Clone, Debug)]
pub struct Subscriber {
    name: Cow<'static, str>,
    table: Vec<(String, Vec<ListenerSource>)>,
}

impl Subscriber {
    /// Creates an empty, unnamed table.
    pub fn new() -> Self {
        Self::named("subscriber")
    }

    /// Creates an empty table with a name used in logs.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            table: Vec::new(),
        }
    }

    /// Appends `listener` to the entry for `event`, creating the entry if needed.
    ///
    /// Entries keep the order in which events were first added.
    #[must_use]
    pub fn on(mut self, event: impl Into<String>, listener: impl Into<ListenerSource>) -> Self {
        let event = event.into();
        let listener = listener.into();
        match self.table.iter_mut().find(|(e, _)| *e == event) {
            Some((_, refs)) => refs.push(listener),
            None => self.table.push((event, vec![listener])),
        }
        self
    }

    /// Returns the table entries in order.
    pub fn entries(&self) -> &[(String, Vec<ListenerSource>)] {
        &self.table
    }

    /// Returns `true` if no event is mapped.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for Subscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscribe for Subscriber {
    fn subscribe(&self, dispatcher: &Dispatcher) -> Result<(), EventError> {
        if self.table.is_empty() {
            return Ok(());
        }

        for (event, refs) in &self.table {
            for listener in refs {
                dispatcher.listen(event.as_str(), listener.clone())?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::listeners::{ListenerFn, ListenerRef, Payload};
    use crate::resolver::Container;

    fn noop(name: &'static str) -> ListenerRef {
        ListenerFn::arc(name, |_: &str, _: &Payload| {})
    }

    #[test]
    fn test_on_merges_same_event() {
        let a = noop("a");
        let sub = Subscriber::new()
            .on("x", Arc::clone(&a))
            .on("y", "ids.b")
            .on("x", "ids.c");

        let events: Vec<&str> = sub.entries().iter().map(|(e, _)| e.as_str()).collect();
        assert_eq!(events, vec!["x", "y"]);
        assert_eq!(sub.entries()[0].1.len(), 2);
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(Subscriber::default().name(), Subscriber::new().name());
        assert_eq!(Subscriber::default().name(), "subscriber");
        assert!(Subscriber::default().is_empty());
    }

    #[test]
    fn test_empty_table_is_noop() {
        let dispatcher = Dispatcher::builder(Default::default()).build();
        assert!(Subscriber::new().subscribe(&dispatcher).is_ok());
    }

    #[test]
    fn test_registers_pairs_in_order() {
        let ioc = Arc::new(Container::new());
        let first = noop("first");
        let second = noop("second");
        ioc.singleton("first", Arc::clone(&first));

        let dispatcher = Dispatcher::builder(Default::default())
            .with_resolver(ioc)
            .build();

        Subscriber::new()
            .on("e", "first")
            .on("e", Arc::clone(&second))
            .subscribe(&dispatcher)
            .unwrap();

        let names: Vec<String> = dispatcher
            .get_listeners("e")
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_stops_at_first_error() {
        let dispatcher = Dispatcher::builder(Default::default()).build();
        let err = Subscriber::new()
            .on("a", noop("a"))
            .on("b", "missing")
            .on("c", noop("c"))
            .subscribe(&dispatcher)
            .unwrap_err();

        assert!(matches!(err, EventError::UnresolvedIdentifier { .. }));
        assert!(dispatcher.has_listeners("a"));
        assert!(!dispatcher.has_listeners("c"));
    }
}
