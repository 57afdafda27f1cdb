use async_trait::async_trait;

use crate::checkout::CheckoutSession;
use crate::order::{Feedback, Order};
use crate::CheckoutResult;

/// Repository trait for checkout session storage
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn get_session(&self, id: &str) -> CheckoutResult<Option<CheckoutSession>>;

    async fn save_session(&self, session: &CheckoutSession) -> CheckoutResult<()>;

    async fn delete_session(&self, id: &str) -> CheckoutResult<()>;
}

/// Repository trait for order storage
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create_order(&self, order: &Order) -> CheckoutResult<()>;

    async fn get_order(&self, id: &str) -> CheckoutResult<Option<Order>>;
}

/// Repository trait for post-checkout feedback
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Overwrites any earlier feedback for the same session.
    async fn save_feedback(&self, feedback: &Feedback) -> CheckoutResult<()>;

    async fn get_feedback(&self, session_id: &str) -> CheckoutResult<Option<Feedback>>;
}
