//! # Resolver capability.
//!
//! A [`Resolver`] maps an identifier to a [`Binding`]. The dispatcher checks
//! the binding's kind at registration time: a listener reference must yield
//! [`Binding::Listener`], a subscriber reference [`Binding::Subscriber`].

use std::any::Any;
use std::sync::Arc;

use crate::error::EventError;
use crate::listeners::ListenerRef;
use crate::subscribers::SubscriberRef;

/// Shared handle to a resolver.
pub type ResolverRef = Arc<dyn Resolver>;

/// Value bound to an identifier.
#[derive(Clone)]
pub enum Binding {
    /// Something that handles events.
    Listener(ListenerRef),
    /// Something that registers listeners in bulk.
    Subscriber(SubscriberRef),
    /// Any other value; never accepted as a listener or subscriber.
    Value(Arc<dyn Any + Send + Sync>),
}

impl Binding {
    /// Wraps an arbitrary value.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Binding::Value(Arc::new(value))
    }

    /// Returns a short name of the binding kind for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Binding::Listener(_) => "listener",
            Binding::Subscriber(_) => "subscriber",
            Binding::Value(_) => "value",
        }
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Listener(l) => f.debug_tuple("Listener").field(&l.name()).finish(),
            Binding::Subscriber(s) => f.debug_tuple("Subscriber").field(&s.name()).finish(),
            Binding::Value(_) => f.write_str("Value(..)"),
        }
    }
}

impl From<ListenerRef> for Binding {
    fn from(listener: ListenerRef) -> Self {
        Binding::Listener(listener)
    }
}

impl From<SubscriberRef> for Binding {
    fn from(subscriber: SubscriberRef) -> Self {
        Binding::Subscriber(subscriber)
    }
}

/// # Resolves identifiers to bindings.
///
/// Unknown identifiers fail with [`EventError::UnresolvedIdentifier`].
pub trait Resolver: Send + Sync + 'static {
    /// Returns the value bound to `id`.
    fn resolve(&self, id: &str) -> Result<Binding, EventError>;
}
