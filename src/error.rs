//! Error types used by the dispatcher, its listeners and schedulers.
//!
//! This module defines three error enums:
//!
//! - [`EventError`]: errors raised by the dispatcher API (`listen`, `subscribe`, `fire`).
//! - [`ListenerError`]: errors returned by individual listeners during a dispatch pass.
//! - [`ScheduleError`]: errors raised when deferred work cannot be submitted.
//!
//! All types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// # Errors produced by the dispatcher API.
///
/// Resolution errors (`InvalidListener`, `UnresolvedIdentifier`, `InvalidSubscriber`)
/// are raised synchronously by the call that triggered resolution, never at dispatch time.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EventError {
    /// A listener reference did not resolve to something that can handle events.
    #[error("listener {reference:?} must resolve to a listener")]
    InvalidListener {
        /// The reference that was given (identifier or listener name).
        reference: String,
    },

    /// The resolver has no binding for the given identifier.
    #[error("no binding registered for identifier {id:?}")]
    UnresolvedIdentifier {
        /// The identifier that could not be resolved.
        id: String,
    },

    /// A wildcard pattern could not be compiled.
    #[error("wildcard pattern {pattern:?} cannot be compiled: {error}")]
    InvalidPattern {
        /// The pattern as given to `listen`.
        pattern: String,
        /// Compiler message.
        error: String,
    },

    /// A subscriber reference did not resolve to something that can subscribe.
    #[error("subscriber {reference:?} must resolve to a subscriber")]
    InvalidSubscriber {
        /// The reference that was given.
        reference: String,
    },

    /// A listener failed during a synchronous dispatch.
    #[error(transparent)]
    Listener(#[from] ListenerError),

    /// Background dispatch could not be submitted to the scheduler.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl EventError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::EventError;
    ///
    /// let err = EventError::UnresolvedIdentifier { id: "audit".into() };
    /// assert_eq!(err.as_label(), "event_unresolved_identifier");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EventError::InvalidListener { .. } => "event_invalid_listener",
            EventError::UnresolvedIdentifier { .. } => "event_unresolved_identifier",
            EventError::InvalidPattern { .. } => "event_invalid_pattern",
            EventError::InvalidSubscriber { .. } => "event_invalid_subscriber",
            EventError::Listener(e) => e.as_label(),
            EventError::Schedule(e) => e.as_label(),
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EventError::InvalidListener { reference } => format!("invalid listener: {reference}"),
            EventError::UnresolvedIdentifier { id } => format!("unresolved identifier: {id}"),
            EventError::InvalidPattern { pattern, error } => {
                format!("invalid pattern {pattern}: {error}")
            }
            EventError::InvalidSubscriber { reference } => {
                format!("invalid subscriber: {reference}")
            }
            EventError::Listener(e) => e.as_message(),
            EventError::Schedule(e) => e.as_message(),
        }
    }
}

/// # Errors returned by listeners.
///
/// A listener error aborts the remainder of the dispatch pass and is handed
/// back to the caller of [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) unchanged.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// Listener failed while handling the event.
    #[error("listener failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Fail`].
    ///
    /// ```
    /// use eventvisor::ListenerError;
    ///
    /// let err = ListenerError::fail("db down");
    /// assert_eq!(err.to_string(), "listener failed: db down");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        ListenerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Fail { .. } => "listener_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Fail { error } => format!("error: {error}"),
        }
    }
}

/// # Errors raised by schedulers.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// No async runtime was available to run the deferred task.
    #[error("no runtime available to schedule slot {slot:?}")]
    NoRuntime {
        /// Slot the task was submitted under.
        slot: String,
    },
}

impl ScheduleError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ScheduleError::NoRuntime { .. } => "schedule_no_runtime",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ScheduleError::NoRuntime { slot } => format!("no runtime for slot {slot}"),
        }
    }
}
