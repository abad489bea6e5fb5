use std::sync::Arc;

use crate::core::Dispatcher;
use crate::error::EventError;

/// Shared handle to a subscriber.
pub type SubscriberRef = Arc<dyn Subscribe>;

/// Registers listeners with a dispatcher.
///
/// ### Implementation requirements
/// - Only call the dispatcher's registration API; do not dispatch from here.
/// - Return the first registration error unchanged.
pub trait Subscribe: Send + Sync + 'static {
    /// Registers this subscriber's listeners with `dispatcher`.
    fn subscribe(&self, dispatcher: &Dispatcher) -> Result<(), EventError>;

    /// Returns the subscriber name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// What [`Dispatcher::subscribe`](crate::Dispatcher::subscribe) accepts.
#[derive(Clone)]
pub enum SubscriberSource {
    /// Identifier resolved through the dispatcher's [`Resolver`](crate::Resolver).
    Id(String),
    /// An already constructed subscriber.
    Subscriber(SubscriberRef),
}

impl SubscriberSource {
    /// Returns a description of the source for logs and errors.
    pub fn describe(&self) -> &str {
        match self {
            SubscriberSource::Id(id) => id,
            SubscriberSource::Subscriber(s) => s.name(),
        }
    }
}

impl std::fmt::Debug for SubscriberSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriberSource::Id(id) => f.debug_tuple("Id").field(id).finish(),
            SubscriberSource::Subscriber(s) => f.debug_tuple("Subscriber").field(&s.name()).finish(),
        }
    }
}

impl From<&str> for SubscriberSource {
    fn from(id: &str) -> Self {
        SubscriberSource::Id(id.to_string())
    }
}

impl From<String> for SubscriberSource {
    fn from(id: String) -> Self {
        SubscriberSource::Id(id)
    }
}

impl From<SubscriberRef> for SubscriberSource {
    fn from(subscriber: SubscriberRef) -> Self {
        SubscriberSource::Subscriber(subscriber)
    }
}

impl From<&SubscriberRef> for SubscriberSource {
    fn from(subscriber: &SubscriberRef) -> Self {
        SubscriberSource::Subscriber(Arc::clone(subscriber))
    }
}
