//! # Example: background
//!
//! Background dispatch through the tokio scheduler, with the built-in
//! [`LogListener`] tracing every event.
//!
//! Demonstrates how to:
//! - Fire events in the background (`fire(.., in_background = true, ..)`).
//! - Coalesce background fires on the shared slot (`Admission::Replace`).
//! - Defer work per listener with [`BackgroundListener`] and a delay.
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example background --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use eventvisor::{
    Admission, BackgroundListener, Dispatcher, DispatcherConfig, ListenerError, ListenerRef,
    LogListener, Payload, Process, SchedulerRef, TokioScheduler,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

struct Thumbnailer;

impl Process for Thumbnailer {
    fn process(&self, event: &str, payload: &Payload) -> Result<(), ListenerError> {
        let Some(path) = payload["path"].as_str() else {
            return Err(ListenerError::fail("payload has no path"));
        };
        println!("[thumbnailer] {event}: rendering {path}");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scheduler: SchedulerRef = Arc::new(TokioScheduler::new(Admission::Replace));
    let dispatcher = Dispatcher::builder(DispatcherConfig::default())
        .with_scheduler(Arc::clone(&scheduler))
        .build();

    let log: ListenerRef = Arc::new(LogListener);
    let thumbs: ListenerRef = Arc::new(
        BackgroundListener::new(Thumbnailer, Arc::clone(&scheduler))
            .with_process_id("thumbnailer")
            .with_delay(Duration::from_millis(100)),
    );

    dispatcher.listen("*", log)?;
    dispatcher.listen("image.uploaded", thumbs)?;

    // Three background fires on the shared slot: only the last one runs.
    for n in 1..=3 {
        dispatcher.fire("image.uploaded", json!({"path": format!("img-{n}.png")}), true, true)?;
    }
    println!("fired 3 events in the background on slot {}", dispatcher.slot());

    // Synchronous fire: listeners run before this returns.
    dispatcher.emit("image.deleted", json!({"path": "old.png"}))?;

    tokio::time::sleep(Duration::from_millis(300)).await;
    Ok(())
}
