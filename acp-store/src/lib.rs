pub mod app_config;
pub mod events;
pub mod memory_repo;

pub use events::{LogEmitter, WebhookEmitter};
pub use memory_repo::{InMemoryFeedbackRepository, InMemoryOrderRepository, InMemorySessionRepository};
