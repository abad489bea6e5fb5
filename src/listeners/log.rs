//! # Simple logging listener for debugging and demos.
//!
//! [`LogListener`] records every event it receives through `tracing` and
//! always continues. Register it under `*` to trace all traffic.
//!
//! ## Output format
//! ```text
//! INFO eventvisor: event event="order.created" payload={"id":1}
//! ```
//!
//! ## Example
//! ```no_run
//! # use eventvisor::{Dispatcher, ListenerRef, LogListener};
//! # use std::sync::Arc;
//! let dispatcher = Dispatcher::builder(Default::default()).build();
//! let log: ListenerRef = Arc::new(LogListener);
//! dispatcher.listen("*", log).unwrap();
//! ```

use crate::error::ListenerError;
use crate::listeners::listener::{Listener, Outcome, Payload};

/// Logging listener.
///
/// Enabled via the `logging` feature. Not intended for production use;
/// implement a custom [`Listener`] for structured auditing.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogListener;

impl Listener for LogListener {
    fn handle(&self, event: &str, payload: &Payload) -> Result<Outcome, ListenerError> {
        tracing::info!(target: "eventvisor", event, payload = %payload, "event");
        Ok(Outcome::Continue)
    }

    fn name(&self) -> &str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_always_continues() {
        assert_eq!(
            LogListener.handle("anything", &json!({"k": "v"})),
            Ok(Outcome::Continue)
        );
    }
}
