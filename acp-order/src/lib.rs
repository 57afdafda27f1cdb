pub mod dispatch;
pub mod locks;
pub mod manager;
pub mod models;
pub mod orchestrator;

pub use dispatch::EventDispatcher;
pub use locks::SessionLocks;
pub use manager::{CheckoutSettings, SessionManager};
pub use models::{
    CompleteSessionRequest, CompletionOutcome, CreateSessionRequest, FeedbackRequest,
    UpdateSessionRequest,
};
pub use orchestrator::{Completion, CompletionOrchestrator, MockPaymentAuthorizer};
