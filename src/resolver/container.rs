//! # Id-keyed binding container.
//!
//! [`Container`] is a minimal [`Resolver`]:
//! - `singleton` bindings hand out the **same** value on every resolve, so a
//!   listener registered twice through its identifier is deduplicated;
//! - `factory` bindings build a **fresh** value per resolve, so each
//!   registration through the identifier adds a new listener.
//!
//! ## Example
//! ```rust
//! use eventvisor::{Binding, Container, ListenerFn, ListenerRef, Payload, Resolver};
//!
//! let ioc = Container::new();
//! let audit: ListenerRef = ListenerFn::arc("audit", |_: &str, _: &Payload| {});
//! ioc.singleton("listeners.audit", audit);
//!
//! assert!(matches!(ioc.resolve("listeners.audit"), Ok(Binding::Listener(_))));
//! assert!(ioc.resolve("listeners.missing").is_err());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::resolver::{Binding, Resolver};
use crate::error::EventError;

type Factory = Arc<dyn Fn() -> Binding + Send + Sync>;

/// How a binding is produced.
enum Entry {
    /// Created once and reused.
    Singleton(Binding),
    /// Created each time it is requested.
    Factory(Factory),
}

/// Identifier → binding container.
#[derive(Default)]
pub struct Container {
    entries: RwLock<HashMap<String, Entry>>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `id` to a shared value. Replaces any previous binding.
    pub fn singleton(&self, id: impl Into<String>, binding: impl Into<Binding>) {
        let id = id.into();
        tracing::debug!(id = %id, "bound singleton");
        self.entries
            .write()
            .insert(id, Entry::Singleton(binding.into()));
    }

    /// Binds `id` to a factory invoked on every resolve. Replaces any previous binding.
    pub fn factory<F>(&self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> Binding + Send + Sync + 'static,
    {
        let id = id.into();
        tracing::debug!(id = %id, "bound factory");
        self.entries
            .write()
            .insert(id, Entry::Factory(Arc::new(factory)));
    }

    /// Returns `true` if `id` is bound.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().contains_key(id)
    }

    /// Removes the binding for `id`.
    pub fn forget(&self, id: &str) -> bool {
        self.entries.write().remove(id).is_some()
    }
}

impl Resolver for Container {
    fn resolve(&self, id: &str) -> Result<Binding, EventError> {
        // Factories run without the lock; they may resolve other ids.
        let make = match self.entries.read().get(id) {
            Some(Entry::Singleton(binding)) => return Ok(binding.clone()),
            Some(Entry::Factory(make)) => Arc::clone(make),
            None => return Err(EventError::UnresolvedIdentifier { id: id.to_string() }),
        };
        Ok(make())
    }
}
