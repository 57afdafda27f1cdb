use acp_core::checkout::{CheckoutSession, Message, MessageCode};
use acp_core::order::Order;
use acp_core::payment::{Authorization, PaymentAuthorizer, PaymentData, PaymentError};
use acp_core::repository::OrderRepository;
use acp_core::{CheckoutError, CheckoutResult};
use acp_shared::{prefixed_id, IdPrefix, Masked};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::dispatch::EventDispatcher;

pub const DECLINE_MESSAGE: &str = "Payment declined.";

/// Outcome of driving a session through payment.
#[derive(Debug, Clone)]
pub enum Completion {
    Paid(Order),
    Declined(Message),
}

/// Authorizes payment for a session and, on approval, records the order and
/// announces it.
pub struct CompletionOrchestrator {
    authorizer: Arc<dyn PaymentAuthorizer>,
    orders: Arc<dyn OrderRepository>,
    events: EventDispatcher,
    authorization_timeout: Duration,
}

impl CompletionOrchestrator {
    pub fn new(
        authorizer: Arc<dyn PaymentAuthorizer>,
        orders: Arc<dyn OrderRepository>,
        events: EventDispatcher,
        authorization_timeout: Duration,
    ) -> Self {
        Self {
            authorizer,
            orders,
            events,
            authorization_timeout,
        }
    }

    pub async fn complete(
        &self,
        session: &CheckoutSession,
        payment: &PaymentData,
    ) -> CheckoutResult<Completion> {
        let amount = session
            .grand_total()
            .ok_or_else(|| CheckoutError::InvalidState(format!("session {} has no total", session.id)))?;

        let authorization = match self.authorize(&payment.token, amount, &session.currency).await {
            Ok(authorization) => {
                info!(
                    "Authorized {} {} for session {} ({})",
                    authorization.amount, authorization.currency, session.id, authorization.auth_id
                );
                authorization
            }
            Err(e) => {
                warn!("Payment for session {} not authorized: {}", session.id, e);
                return Ok(Completion::Declined(Message::error(
                    MessageCode::PaymentDeclined,
                    DECLINE_MESSAGE,
                )));
            }
        };

        let order = Order::paid(
            prefixed_id(IdPrefix::Order),
            session.id.clone(),
            amount,
            session.currency.clone(),
        );
        if let Err(e) = self.orders.create_order(&order).await {
            error!(
                "Authorization {} for session {} approved but order {} was not stored: {}",
                authorization.auth_id, session.id, order.id, e
            );
            return Err(e);
        }
        self.events.dispatch(order.created_event());

        info!("Order {} created for session {}", order.id, session.id);
        Ok(Completion::Paid(order))
    }

    async fn authorize(
        &self,
        token: &Masked<String>,
        amount: i64,
        currency: &str,
    ) -> Result<Authorization, PaymentError> {
        match tokio::time::timeout(
            self.authorization_timeout,
            self.authorizer.authorize(token, amount, currency),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(PaymentError::Timeout(
                u64::try_from(self.authorization_timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }
}

pub const DEFAULT_DECLINE_CEILING: i64 = 50_000;

/// Deterministic authorizer: approves any amount up to the ceiling.
#[derive(Debug, Clone)]
pub struct MockPaymentAuthorizer {
    decline_ceiling: i64,
}

impl MockPaymentAuthorizer {
    pub fn new(decline_ceiling: i64) -> Self {
        Self { decline_ceiling }
    }
}

impl Default for MockPaymentAuthorizer {
    fn default() -> Self {
        Self::new(DEFAULT_DECLINE_CEILING)
    }
}

#[async_trait]
impl PaymentAuthorizer for MockPaymentAuthorizer {
    async fn authorize(
        &self,
        _token: &Masked<String>,
        amount: i64,
        currency: &str,
    ) -> Result<Authorization, PaymentError> {
        if amount > self.decline_ceiling {
            return Err(PaymentError::Declined("authorization_failed".to_string()));
        }
        Ok(Authorization {
            auth_id: "auth_mock".to_string(),
            amount,
            currency: currency.to_string(),
        })
    }
}
