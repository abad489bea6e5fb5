//! # Subscriber Example
//!
//! Shows how to register listeners in bulk, by identifier, through a
//! [`Container`] and a table-driven [`Subscriber`], plus a custom
//! [`Subscribe`] implementation that counts events.
//!
//! ## Run
//! ```bash
//! cargo run --example subscriber
//! ```

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use eventvisor::{
    Container, Dispatcher, DispatcherConfig, EventError, ListenerFn, ListenerRef, Payload,
    Subscribe, Subscriber, SubscriberRef,
};
use serde_json::json;

struct MetricsSubscriber {
    orders: Arc<AtomicU64>,
    refunds: Arc<AtomicU64>,
}

impl MetricsSubscriber {
    fn new() -> Self {
        Self {
            orders: Arc::new(AtomicU64::new(0)),
            refunds: Arc::new(AtomicU64::new(0)),
        }
    }

    fn print_stats(&self) {
        println!();
        println!("Metrics:");
        println!(" ├─► Orders:  {}", self.orders.load(Ordering::Relaxed));
        println!(" └─► Refunds: {}", self.refunds.load(Ordering::Relaxed));
    }
}

impl Subscribe for MetricsSubscriber {
    fn subscribe(&self, dispatcher: &Dispatcher) -> Result<(), EventError> {
        let orders = Arc::clone(&self.orders);
        let count_orders: ListenerRef = ListenerFn::arc("metrics.orders", move |_: &str, _: &Payload| {
            orders.fetch_add(1, Ordering::Relaxed);
        });

        let refunds = Arc::clone(&self.refunds);
        let count_refunds: ListenerRef = ListenerFn::arc("metrics.refunds", move |_: &str, _: &Payload| {
            refunds.fetch_add(1, Ordering::Relaxed);
        });

        dispatcher.listen("order.*", count_orders)?;
        dispatcher.listen("order.refunded", count_refunds)
    }

    fn name(&self) -> &str {
        "metrics"
    }
}

fn main() -> anyhow::Result<()> {
    // 1. Bind listeners and a subscriber by identifier
    let ioc = Arc::new(Container::new());

    let mailer: ListenerRef = ListenerFn::arc("mailer", |event: &str, payload: &Payload| {
        println!("[mailer] {event} -> {}", payload["email"]);
    });
    let ledger: ListenerRef = ListenerFn::arc("ledger", |event: &str, payload: &Payload| {
        println!("[ledger] {event} amount={}", payload["amount"]);
    });
    ioc.singleton("listeners.mailer", mailer);
    ioc.singleton("listeners.ledger", ledger);

    let billing: SubscriberRef = Arc::new(
        Subscriber::named("billing")
            .on("order.paid", "listeners.ledger")
            .on("order.paid", "listeners.mailer")
            .on("order.refunded", "listeners.ledger"),
    );
    ioc.singleton("subscribers.billing", billing);

    let dispatcher = Dispatcher::builder(DispatcherConfig::default())
        .with_resolver(ioc)
        .build();

    // 2. Subscribe by identifier and by handle
    dispatcher.subscribe("subscribers.billing")?;

    let metrics = Arc::new(MetricsSubscriber::new());
    dispatcher.subscribe(Arc::clone(&metrics) as SubscriberRef)?;

    // 3. Fire a few events
    dispatcher.emit("order.paid", json!({"email": "ada@example.com", "amount": 42}))?;
    dispatcher.emit("order.refunded", json!({"email": "ada@example.com", "amount": 42}))?;
    dispatcher.emit("order.shipped", json!({}))?;

    // 4. Unknown identifiers fail at registration time
    if let Err(e) = dispatcher.subscribe("subscribers.missing") {
        println!("subscribe failed: {} ({})", e, e.as_label());
    }

    metrics.print_stats();
    Ok(())
}
