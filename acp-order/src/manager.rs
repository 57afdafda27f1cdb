use acp_catalog::{default_fulfillment_options, select_option, CartCalculator};
use acp_core::checkout::{CheckoutSession, Link, LinkType, Message, PaymentProvider, SessionStatus};
use acp_core::order::Feedback;
use acp_core::payment::PaymentData;
use acp_core::repository::{FeedbackRepository, SessionRepository};
use acp_core::{CheckoutError, CheckoutResult};
use acp_shared::{prefixed_id, IdPrefix};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::locks::SessionLocks;
use crate::models::{
    CompleteSessionRequest, CompletionOutcome, CreateSessionRequest, FeedbackRequest,
    UpdateSessionRequest,
};
use crate::orchestrator::{Completion, CompletionOrchestrator};

pub const ADDRESS_PROMPT: &str = "Add a shipping address to calculate final taxes & enable payment.";

/// Fixed properties stamped onto every new session.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub currency: String,
    pub links: Vec<Link>,
    pub payment_provider: PaymentProvider,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            currency: "usd".to_string(),
            links: vec![
                Link {
                    kind: LinkType::TermsOfUse,
                    url: "https://example.com/terms".to_string(),
                },
                Link {
                    kind: LinkType::PrivacyPolicy,
                    url: "https://example.com/privacy".to_string(),
                },
            ],
            payment_provider: PaymentProvider::default(),
        }
    }
}

/// Owns the checkout session lifecycle.
///
/// ```text
/// create ──► in_progress ◄──update──► ready_for_payment ──complete──► completed
///                 │                          │   ▲
///                 └──────cancel──────────────┴───┴─ decline (status unchanged)
///                                ▼
///                            canceled
/// ```
///
/// `completed` and `canceled` are terminal. Every mutation of a session runs
/// under that session's lock.
pub struct SessionManager {
    sessions: Arc<dyn SessionRepository>,
    feedback: Arc<dyn FeedbackRepository>,
    calculator: CartCalculator,
    orchestrator: CompletionOrchestrator,
    locks: SessionLocks,
    settings: CheckoutSettings,
}

impl SessionManager {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        feedback: Arc<dyn FeedbackRepository>,
        calculator: CartCalculator,
        orchestrator: CompletionOrchestrator,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            sessions,
            feedback,
            calculator,
            orchestrator,
            locks: SessionLocks::new(),
            settings,
        }
    }

    /// Create a session priced against the default fulfillment option.
    pub async fn create(&self, request: CreateSessionRequest) -> CheckoutResult<CheckoutSession> {
        request.validate()?;

        let options = default_fulfillment_options();
        let selected = options.first().cloned();
        let cart = self.calculator.compute(&request.items, selected.as_ref())?;

        let ready = request.fulfillment_address.is_some();
        let messages = if ready {
            Vec::new()
        } else {
            vec![Message::info(ADDRESS_PROMPT)]
        };

        let session = CheckoutSession {
            id: prefixed_id(IdPrefix::CheckoutSession),
            buyer: request.buyer,
            payment_provider: self.settings.payment_provider.clone(),
            status: SessionStatus::for_address(ready),
            currency: self.settings.currency.clone(),
            line_items: cart.line_items,
            fulfillment_address: request.fulfillment_address,
            fulfillment_options: options,
            fulfillment_option_id: selected.map(|option| option.id),
            totals: cart.totals,
            messages,
            links: self.settings.links.clone(),
            order_id: None,
        };

        self.sessions.save_session(&session).await?;
        info!(
            "Created checkout session {} ({}, total {})",
            session.id, session.status, cart.grand_total
        );
        Ok(session)
    }

    pub async fn get(&self, session_id: &str) -> CheckoutResult<CheckoutSession> {
        self.sessions
            .get_session(session_id)
            .await?
            .ok_or_else(|| CheckoutError::NotFound(session_id.to_string()))
    }

    /// Re-price the cart with the merged request and re-derive the status.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        session_id: &str,
        request: UpdateSessionRequest,
    ) -> CheckoutResult<CheckoutSession> {
        self.get(session_id).await?;
        let _guard = self.locks.acquire(session_id).await;

        let mut session = self.get(session_id).await?;
        if session.status.is_terminal() {
            return Err(CheckoutError::InvalidTransition {
                action: "update",
                status: session.status,
            });
        }
        request.validate()?;

        // An empty list keeps the current cart.
        let items = match request.items.clone() {
            Some(items) if !items.is_empty() => items,
            _ => session.requested_items(),
        };
        let options = if session.fulfillment_options.is_empty() {
            default_fulfillment_options()
        } else {
            session.fulfillment_options.clone()
        };
        let wanted = request
            .requested_option_id()
            .or(session.fulfillment_option_id.as_deref());
        let selected = select_option(&options, wanted).cloned();
        if let (Some(wanted), Some(selected)) = (wanted, selected.as_ref()) {
            if wanted != selected.id {
                warn!(
                    "Unknown fulfillment option {} for session {}, using {}",
                    wanted, session_id, selected.id
                );
            }
        }

        let cart = self.calculator.compute(&items, selected.as_ref())?;

        if let Some(address) = request.fulfillment_address {
            session.fulfillment_address = Some(address);
        }
        if let Some(buyer) = request.buyer {
            session.buyer = Some(buyer);
        }
        session.line_items = cart.line_items;
        session.fulfillment_options = options;
        session.fulfillment_option_id = selected.map(|option| option.id);
        session.totals = cart.totals;
        session.status = SessionStatus::for_address(session.fulfillment_address.is_some());
        session.messages.clear();

        self.sessions.save_session(&session).await?;
        info!(
            "Updated checkout session {} ({}, total {})",
            session.id, session.status, cart.grand_total
        );
        Ok(session)
    }

    /// Authorize payment and finalize the session. A decline is an outcome,
    /// not an error: the session keeps its status and carries one error message.
    #[tracing::instrument(skip(self, request))]
    pub async fn complete(
        &self,
        session_id: &str,
        request: CompleteSessionRequest,
    ) -> CheckoutResult<CompletionOutcome> {
        self.get(session_id).await?;
        let _guard = self.locks.acquire(session_id).await;

        let mut session = self.get(session_id).await?;
        if session.status.is_terminal() {
            return Err(CheckoutError::InvalidTransition {
                action: "complete",
                status: session.status,
            });
        }
        request.validate()?;

        let payment: &PaymentData = &request.payment_data;
        let completion = self.orchestrator.complete(&session, payment).await?;

        if let Some(buyer) = request.buyer {
            session.buyer = Some(buyer);
        }

        let outcome = match completion {
            Completion::Paid(order) => {
                session.status = SessionStatus::Completed;
                session.order_id = Some(order.id);
                self.sessions.save_session(&session).await?;
                info!("Checkout session {} completed", session.id);
                CompletionOutcome::Completed(session)
            }
            Completion::Declined(message) => {
                session.messages = vec![message];
                self.sessions.save_session(&session).await?;
                warn!(
                    "Checkout session {} declined, status stays {}",
                    session.id, session.status
                );
                CompletionOutcome::Declined(session)
            }
        };
        Ok(outcome)
    }

    /// Cancel a non-terminal session. Line items, totals and messages are kept.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, session_id: &str) -> CheckoutResult<CheckoutSession> {
        self.get(session_id).await?;
        let _guard = self.locks.acquire(session_id).await;

        let mut session = self.get(session_id).await?;
        match session.status {
            SessionStatus::Completed => {
                return Err(CheckoutError::InvalidTransition {
                    action: "cancel",
                    status: session.status,
                })
            }
            SessionStatus::Canceled => return Err(CheckoutError::AlreadyCanceled),
            SessionStatus::InProgress | SessionStatus::ReadyForPayment => {}
        }

        session.status = SessionStatus::Canceled;
        self.sessions.save_session(&session).await?;
        info!("Checkout session {} canceled", session.id);
        Ok(session)
    }

    /// Record a rating for a session in any status, replacing earlier feedback.
    pub async fn submit_feedback(
        &self,
        session_id: &str,
        request: FeedbackRequest,
    ) -> CheckoutResult<Feedback> {
        request.validate()?;
        self.get(session_id).await?;

        let feedback = Feedback {
            session_id: session_id.to_string(),
            rating: request.rating,
            comment: request.comment,
            submitted_at: Utc::now(),
        };
        self.feedback.save_feedback(&feedback).await?;
        info!("Feedback {} recorded for session {}", feedback.rating, session_id);
        Ok(feedback)
    }

    pub async fn get_feedback(&self, session_id: &str) -> CheckoutResult<Feedback> {
        self.get(session_id).await?;
        self.feedback
            .get_feedback(session_id)
            .await?
            .ok_or_else(|| CheckoutError::NotFound(format!("feedback for {}", session_id)))
    }
}
