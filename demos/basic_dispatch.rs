//! # Example: basic_dispatch
//!
//! Minimal synchronous dispatch with exact and wildcard listeners.
//!
//! Demonstrates how to:
//! - Define listeners using [`ListenerFn`].
//! - Register them for exact names and `*` patterns.
//! - Stop propagation by returning `false` while dispatching with `halt = true`.
//!
//! ## Flow
//! ```text
//! emit("user.login")
//!     ├─► user.*      (wildcard, runs first)
//!     ├─► user.login  (exact)
//!     └─► done
//!
//! emit("user.banned")
//!     ├─► user.*      returns false ─► halt
//!     └─► user.banned never runs
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_dispatch
//! ```

use eventvisor::{Dispatcher, DispatcherConfig, ListenerFn, ListenerRef, Payload};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    // 1. Build a dispatcher (no resolver needed for direct listeners)
    let dispatcher = Dispatcher::builder(DispatcherConfig::default()).build();

    // 2. A wildcard gatekeeper that blocks banned users
    let gate: ListenerRef = ListenerFn::arc("gate", |event: &str, payload: &Payload| {
        println!("[gate] {event} {payload}");
        event != "user.banned"
    });

    // 3. Exact listeners
    let welcome: ListenerRef = ListenerFn::arc("welcome", |_: &str, payload: &Payload| {
        println!("[welcome] hello {}", payload["name"]);
    });
    let notify: ListenerRef = ListenerFn::arc("notify", |event: &str, _: &Payload| {
        println!("[notify] {event}");
    });

    dispatcher.listen("user.*", gate)?;
    dispatcher.listen("user.login", welcome)?;
    dispatcher.listen(["user.login", "user.banned"], notify)?;

    println!("listeners for user.login: {}", dispatcher.get_listeners("user.login").len());

    dispatcher.emit("user.login", json!({"name": "ada"}))?;
    dispatcher.emit("user.banned", json!({"name": "mallory"}))?;

    // 4. Without halting, every listener runs
    dispatcher.fire("user.banned", json!({"name": "mallory"}), false, false)?;

    // 5. Forget removes the key and everything under it
    dispatcher.forget("user.*");
    println!("user.logout has listeners: {}", dispatcher.has_listeners("user.logout"));

    Ok(())
}
