use acp_catalog::CartCalculator;
use acp_core::checkout::{Link, LinkType};
use acp_core::events::{EventError, EventSink};
use acp_core::payment::PaymentAuthorizer;
use acp_core::repository::OrderRepository;
use acp_order::{
    CheckoutSettings, CompletionOrchestrator, EventDispatcher, MockPaymentAuthorizer,
    SessionManager,
};
use acp_store::app_config::Config;
use acp_store::events::sink_from_config;
use acp_store::memory_repo::{
    InMemoryFeedbackRepository, InMemoryOrderRepository, InMemorySessionRepository,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub orders: Arc<dyn OrderRepository>,
}

impl AppState {
    /// Wire the in-memory stores with the given payment and event collaborators.
    /// Must be called inside a Tokio runtime.
    pub fn new(
        config: &Config,
        authorizer: Arc<dyn PaymentAuthorizer>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let orders: Arc<dyn OrderRepository> = Arc::new(InMemoryOrderRepository::new());
        let calculator = CartCalculator::new(
            Arc::new(config.catalog.build()),
            config.pricing.clone(),
        );
        let orchestrator = CompletionOrchestrator::new(
            authorizer,
            orders.clone(),
            EventDispatcher::spawn(sink),
            config.payment.authorization_timeout(),
        );
        let settings = CheckoutSettings {
            currency: config.checkout.currency.clone(),
            links: vec![
                Link {
                    kind: LinkType::TermsOfUse,
                    url: config.checkout.terms_url.clone(),
                },
                Link {
                    kind: LinkType::PrivacyPolicy,
                    url: config.checkout.privacy_url.clone(),
                },
            ],
            ..CheckoutSettings::default()
        };
        let sessions = SessionManager::new(
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(InMemoryFeedbackRepository::new()),
            calculator,
            orchestrator,
            settings,
        );

        Self {
            sessions: Arc::new(sessions),
            orders,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, EventError> {
        let authorizer = Arc::new(MockPaymentAuthorizer::new(config.payment.decline_ceiling));
        let sink = sink_from_config(&config.events)?;
        Ok(Self::new(config, authorizer, sink))
    }
}
