use acp_core::events::EventSink;
use acp_shared::models::OrderEvent;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Hands order events to a background worker so that delivery never blocks
/// or fails the request that produced them.
#[derive(Clone)]
pub struct EventDispatcher {
    tx: mpsc::UnboundedSender<OrderEvent>,
}

impl EventDispatcher {
    /// Start the delivery worker on the current Tokio runtime.
    pub fn spawn(sink: Arc<dyn EventSink>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(sink, rx));
        Self { tx }
    }

    pub fn dispatch(&self, event: OrderEvent) {
        let order_id = event.order_id().to_string();
        if let Err(e) = self.tx.send(event) {
            error!("Event worker is gone, dropping {} for order {}", e.0.event_type(), order_id);
        }
    }
}

async fn run_worker(sink: Arc<dyn EventSink>, mut rx: mpsc::UnboundedReceiver<OrderEvent>) {
    info!("Event worker started, delivering to {}", sink.name());

    while let Some(event) = rx.recv().await {
        match sink.emit(&event).await {
            Ok(()) => info!(
                "Delivered {} for order {} via {}",
                event.event_type(),
                event.order_id(),
                sink.name()
            ),
            Err(e) => warn!(
                "Failed to deliver {} for order {} via {}: {}",
                event.event_type(),
                event.order_id(),
                sink.name(),
                e
            ),
        }
    }

    info!("Event worker stopped");
}
