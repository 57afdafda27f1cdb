use acp_core::checkout::CheckoutSession;
use acp_core::order::{Feedback, Order};
use acp_core::repository::{FeedbackRepository, OrderRepository, SessionRepository};
use acp_core::CheckoutResult;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-lifetime session store. The map lock is held only for a single
/// read or write, never across I/O.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, CheckoutSession>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get_session(&self, id: &str) -> CheckoutResult<Option<CheckoutSession>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn save_session(&self, session: &CheckoutSession) -> CheckoutResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn delete_session(&self, id: &str) -> CheckoutResult<()> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create_order(&self, order: &Order) -> CheckoutResult<()> {
        self.orders
            .write()
            .await
            .insert(order.id.clone(), order.clone());
        Ok(())
    }

    async fn get_order(&self, id: &str) -> CheckoutResult<Option<Order>> {
        Ok(self.orders.read().await.get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryFeedbackRepository {
    feedback: RwLock<HashMap<String, Feedback>>,
}

impl InMemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn save_feedback(&self, feedback: &Feedback) -> CheckoutResult<()> {
        self.feedback
            .write()
            .await
            .insert(feedback.session_id.clone(), feedback.clone());
        Ok(())
    }

    async fn get_feedback(&self, session_id: &str) -> CheckoutResult<Option<Feedback>> {
        Ok(self.feedback.read().await.get(session_id).cloned())
    }
}
