use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Created,
    Paid,
    FulfillmentInProgress,
    Shipped,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Paid => "paid",
            OrderStatus::FulfillmentInProgress => "fulfillment_in_progress",
            OrderStatus::Shipped => "shipped",
        }
    }
}

/// Record of a successfully completed checkout session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub checkout_session_id: String,
    pub total: i64,
    pub currency: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn paid(id: String, checkout_session_id: String, total: i64, currency: String) -> Self {
        Self {
            id,
            checkout_session_id,
            total,
            currency,
            status: OrderStatus::Paid,
            created_at: Utc::now(),
        }
    }

    pub fn created_event(&self) -> acp_shared::models::OrderEvent {
        acp_shared::models::OrderEvent::Created(acp_shared::models::OrderCreatedEvent {
            id: self.id.clone(),
            checkout_session_id: self.checkout_session_id.clone(),
            total: self.total,
            currency: self.currency.clone(),
            status: self.status.as_str().to_string(),
        })
    }
}

/// Post-checkout rating left for a session. At most one per session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feedback {
    pub session_id: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}
