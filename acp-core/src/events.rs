use acp_shared::models::OrderEvent;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Failed to serialize event: {0}")]
    Serialization(String),
    #[error("Failed to deliver event: {0}")]
    Delivery(String),
}

/// Destination for order lifecycle events.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: &OrderEvent) -> Result<(), EventError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
