pub mod checkout;
pub mod events;
pub mod order;
pub mod payment;
pub mod repository;

use checkout::SessionStatus;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Checkout session not found: {0}")]
    NotFound(String),
    #[error("Cannot {action} a session with status '{status}'")]
    InvalidTransition {
        action: &'static str,
        status: SessionStatus,
    },
    #[error("Session already canceled")]
    AlreadyCanceled,
    #[error("Invalid session state: {0}")]
    InvalidState(String),
    #[error("Unknown SKU: {0}")]
    UnknownSku(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Amount overflow while pricing {0}")]
    AmountOverflow(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_message_names_status() {
        let err = CheckoutError::InvalidTransition {
            action: "update",
            status: SessionStatus::Canceled,
        };
        assert_eq!(err.to_string(), "Cannot update a session with status 'canceled'");
    }
}
