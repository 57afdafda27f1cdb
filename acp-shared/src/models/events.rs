use serde::{Deserialize, Serialize};

/// Payload of an `order.created` event.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrderCreatedEvent {
    pub id: String,
    pub checkout_session_id: String,
    pub total: i64,
    pub currency: String,
    pub status: String,
}

/// Envelope posted to the order webhook: `{"type": ..., "data": {...}}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    #[serde(rename = "order.created")]
    Created(OrderCreatedEvent),
}

impl OrderEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Created(_) => "order.created",
        }
    }

    pub fn order_id(&self) -> &str {
        match self {
            OrderEvent::Created(data) => &data.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_created_wire_shape() {
        let event = OrderEvent::Created(OrderCreatedEvent {
            id: "ord_abc".to_string(),
            checkout_session_id: "cs_def".to_string(),
            total: 2769,
            currency: "usd".to_string(),
            status: "paid".to_string(),
        });

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "order.created",
                "data": {
                    "id": "ord_abc",
                    "checkout_session_id": "cs_def",
                    "total": 2769,
                    "currency": "usd",
                    "status": "paid"
                }
            })
        );
        assert_eq!(event.event_type(), "order.created");
        assert_eq!(event.order_id(), "ord_abc");
    }
}
