//! # Function-backed listener (`ListenerFn`)
//!
//! [`ListenerFn`] wraps a closure `F: Fn(&str, &Payload) -> R` where `R` is any
//! [`IntoOutcome`] value: `()`, `bool`, `Option<bool>`, [`Outcome`] or a
//! `Result` of those.
//!
//! State shared between invocations lives behind `Arc<...>` captured by the closure.
//!
//! ## Example
//! ```rust
//! use eventvisor::{ListenerFn, ListenerRef, Payload};
//!
//! let l: ListenerRef = ListenerFn::arc("printer", |event: &str, payload: &Payload| {
//!     println!("{event}: {payload}");
//! });
//!
//! assert_eq!(l.name(), "printer");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::error::ListenerError;
use crate::listeners::listener::{IntoOutcome, Listener, Outcome, Payload};

/// Function-backed listener implementation.
pub struct ListenerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F, R> ListenerFn<F>
where
    F: Fn(&str, &Payload) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a [`ListenerRef`](crate::ListenerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the listener and returns it as a shared handle.
    ///
    /// ## Example
    /// ```rust
    /// use eventvisor::{ListenerFn, ListenerRef, Payload};
    ///
    /// let stop: ListenerRef = ListenerFn::arc("stop", |_: &str, _: &Payload| false);
    /// assert_eq!(stop.name(), "stop");
    /// ```
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F, R> Listener for ListenerFn<F>
where
    F: Fn(&str, &Payload) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn handle(&self, event: &str, payload: &Payload) -> Result<Outcome, ListenerError> {
        (self.f)(event, payload).into_outcome()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> std::fmt::Debug for ListenerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerFn").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_return_values_are_normalized() {
        let unit = ListenerFn::new("unit", |_: &str, _: &Payload| {});
        let halt = ListenerFn::new("halt", |_: &str, _: &Payload| false);
        let fails = ListenerFn::new("fails", |_: &str, _: &Payload| {
            Err::<bool, _>(ListenerError::fail("nope"))
        });

        let p = json!({});
        assert_eq!(unit.handle("e", &p), Ok(Outcome::Continue));
        assert_eq!(halt.handle("e", &p), Ok(Outcome::Halt));
        assert_eq!(fails.handle("e", &p), Err(ListenerError::fail("nope")));
    }

    #[test]
    fn test_receives_event_and_payload() {
        let l = ListenerFn::new("check", |event: &str, payload: &Payload| {
            event == "order.created" && payload["id"] == 1
        });
        assert_eq!(l.handle("order.created", &json!({"id": 1})), Ok(Outcome::Continue));
        assert_eq!(l.handle("order.created", &json!({"id": 2})), Ok(Outcome::Halt));
    }
}
