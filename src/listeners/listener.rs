//! # Listener abstraction.
//!
//! A [`Listener`] is invoked with `(event, payload)` and returns an [`Outcome`].
//! The common handle type is [`ListenerRef`], an `Arc<dyn Listener>` suitable for
//! storing in registries and sharing across background tasks.
//!
//! Listener identity is the identity of the `Arc` allocation: registering the
//! same [`ListenerRef`] twice under one key keeps a single entry, while two
//! separately allocated listeners are always distinct.

use std::sync::Arc;

use crate::error::ListenerError;

/// Event payload handed to every listener.
pub type Payload = serde_json::Value;

/// Shared handle to a listener.
pub type ListenerRef = Arc<dyn Listener>;

/// Result of a single listener invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Keep dispatching to the next listener.
    #[default]
    Continue,
    /// Stop the pass when dispatching in halting mode.
    Halt,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Halt`].
    #[inline]
    pub fn is_halt(self) -> bool {
        matches!(self, Outcome::Halt)
    }
}

impl From<bool> for Outcome {
    fn from(proceed: bool) -> Self {
        if proceed {
            Outcome::Continue
        } else {
            Outcome::Halt
        }
    }
}

/// Conversion of listener return values into a dispatch outcome.
///
/// Absent values (`()`, `None`) count as [`Outcome::Continue`]; `false` means halt.
///
/// ```
/// use eventvisor::{IntoOutcome, Outcome};
///
/// assert_eq!(().into_outcome(), Ok(Outcome::Continue));
/// assert_eq!(None::<bool>.into_outcome(), Ok(Outcome::Continue));
/// assert_eq!(false.into_outcome(), Ok(Outcome::Halt));
/// ```
pub trait IntoOutcome {
    /// Converts `self` into an outcome, or the listener's failure.
    fn into_outcome(self) -> Result<Outcome, ListenerError>;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Result<Outcome, ListenerError> {
        Ok(self)
    }
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<Outcome, ListenerError> {
        Ok(Outcome::Continue)
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> Result<Outcome, ListenerError> {
        Ok(Outcome::from(self))
    }
}

impl IntoOutcome for Option<bool> {
    fn into_outcome(self) -> Result<Outcome, ListenerError> {
        Ok(self.map_or(Outcome::Continue, Outcome::from))
    }
}

impl<T: IntoOutcome> IntoOutcome for Result<T, ListenerError> {
    fn into_outcome(self) -> Result<Outcome, ListenerError> {
        self.and_then(IntoOutcome::into_outcome)
    }
}

/// # Event handler.
///
/// # Example
/// ```
/// use eventvisor::{Listener, ListenerError, Outcome, Payload};
///
/// struct Audit;
///
/// impl Listener for Audit {
///     fn handle(&self, event: &str, _payload: &Payload) -> Result<Outcome, ListenerError> {
///         if event == "order.cancelled" {
///             return Ok(Outcome::Halt);
///         }
///         Ok(Outcome::Continue)
///     }
///
///     fn name(&self) -> &str { "audit" }
/// }
/// ```
pub trait Listener: Send + Sync + 'static {
    /// Handles a single event.
    ///
    /// Returning an error aborts the remaining listeners of the current pass.
    fn handle(&self, event: &str, payload: &Payload) -> Result<Outcome, ListenerError>;

    /// Returns the listener name used in logs.
    ///
    /// The default uses `type_name::<Self>()`; override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Returns `true` when both handles point at the same listener allocation.
#[inline]
pub(crate) fn same_listener(a: &ListenerRef, b: &ListenerRef) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// What [`Dispatcher::listen`](crate::Dispatcher::listen) accepts as a listener.
#[derive(Clone)]
pub enum ListenerSource {
    /// Identifier resolved through the dispatcher's [`Resolver`](crate::Resolver).
    Id(String),
    /// An already constructed listener.
    Listener(ListenerRef),
}

impl ListenerSource {
    /// Returns a description of the source for logs and errors.
    pub fn describe(&self) -> &str {
        match self {
            ListenerSource::Id(id) => id,
            ListenerSource::Listener(l) => l.name(),
        }
    }
}

impl std::fmt::Debug for ListenerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerSource::Id(id) => f.debug_tuple("Id").field(id).finish(),
            ListenerSource::Listener(l) => f.debug_tuple("Listener").field(&l.name()).finish(),
        }
    }
}

impl From<&str> for ListenerSource {
    fn from(id: &str) -> Self {
        ListenerSource::Id(id.to_string())
    }
}

impl From<String> for ListenerSource {
    fn from(id: String) -> Self {
        ListenerSource::Id(id)
    }
}

impl From<ListenerRef> for ListenerSource {
    fn from(listener: ListenerRef) -> Self {
        ListenerSource::Listener(listener)
    }
}

impl From<&ListenerRef> for ListenerSource {
    fn from(listener: &ListenerRef) -> Self {
        ListenerSource::Listener(Arc::clone(listener))
    }
}

/// One or several event names accepted by [`Dispatcher::listen`](crate::Dispatcher::listen).
pub trait IntoEventNames {
    /// Returns the names in the order given.
    fn into_event_names(self) -> Vec<String>;
}

impl IntoEventNames for &str {
    fn into_event_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoEventNames for String {
    fn into_event_names(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoEventNames for &String {
    fn into_event_names(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl IntoEventNames for Vec<String> {
    fn into_event_names(self) -> Vec<String> {
        self
    }
}

impl IntoEventNames for Vec<&str> {
    fn into_event_names(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl IntoEventNames for &[&str] {
    fn into_event_names(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> IntoEventNames for [&str; N] {
    fn into_event_names(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Listener for Noop {
        fn handle(&self, _: &str, _: &Payload) -> Result<Outcome, ListenerError> {
            Ok(Outcome::Continue)
        }
    }

    #[test]
    fn test_outcome_conversions() {
        assert_eq!(true.into_outcome(), Ok(Outcome::Continue));
        assert_eq!(Some(false).into_outcome(), Ok(Outcome::Halt));
        assert_eq!(Some(true).into_outcome(), Ok(Outcome::Continue));
        assert_eq!(Ok::<_, ListenerError>(false).into_outcome(), Ok(Outcome::Halt));
        assert_eq!(
            Err::<bool, _>(ListenerError::fail("x")).into_outcome(),
            Err(ListenerError::fail("x"))
        );
    }

    #[test]
    fn test_identity_is_allocation() {
        let a: ListenerRef = Arc::new(Noop);
        let b: ListenerRef = Arc::new(Noop);
        let a2 = Arc::clone(&a);

        assert!(same_listener(&a, &a2));
        assert!(!same_listener(&a, &b));
    }

    #[test]
    fn test_event_names_keep_order() {
        assert_eq!(["A", "B.*", "C"].into_event_names(), vec!["A", "B.*", "C"]);
        assert_eq!("A".into_event_names(), vec!["A"]);
        assert_eq!(vec!["x".to_string()].into_event_names(), vec!["x"]);
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert!(Noop.name().ends_with("Noop"));
    }
}
