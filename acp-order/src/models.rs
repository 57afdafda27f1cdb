use acp_core::checkout::{Address, Buyer, CheckoutSession, Item};
use acp_core::payment::PaymentData;
use acp_core::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};

pub const MIN_REMIND_IN_DAYS: u16 = 1;
pub const MAX_REMIND_IN_DAYS: u16 = 365;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub buyer: Option<Buyer>,
    pub items: Vec<Item>,
    #[serde(default)]
    pub fulfillment_address: Option<Address>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub buyer: Option<Buyer>,
    #[serde(default)]
    pub items: Option<Vec<Item>>,
    #[serde(default)]
    pub fulfillment_address: Option<Address>,
    #[serde(default)]
    pub fulfillment_option_id: Option<String>,
    /// Accepted for compatibility; discounts are not applied.
    #[serde(default)]
    pub discount_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteSessionRequest {
    #[serde(default)]
    pub buyer: Option<Buyer>,
    pub payment_data: PaymentData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Result of a completion attempt that passed the transition guards.
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    Completed(CheckoutSession),
    /// Payment was refused; the session stays open with an error message.
    Declined(CheckoutSession),
}

impl CompletionOutcome {
    pub fn session(&self) -> &CheckoutSession {
        match self {
            CompletionOutcome::Completed(session) | CompletionOutcome::Declined(session) => session,
        }
    }

    pub fn into_session(self) -> CheckoutSession {
        match self {
            CompletionOutcome::Completed(session) | CompletionOutcome::Declined(session) => session,
        }
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, CompletionOutcome::Declined(_))
    }
}

fn validate_items(items: &[Item]) -> CheckoutResult<()> {
    for (index, item) in items.iter().enumerate() {
        if item.id.trim().is_empty() {
            return Err(CheckoutError::Validation(format!("items[{}].id must not be empty", index)));
        }
        if item.quantity == 0 {
            return Err(CheckoutError::Validation(format!(
                "items[{}].quantity must be greater than 0",
                index
            )));
        }
        if let Some(days) = item
            .restock_preference
            .as_ref()
            .and_then(|preference| preference.remind_in_days)
        {
            if !(MIN_REMIND_IN_DAYS..=MAX_REMIND_IN_DAYS).contains(&days) {
                return Err(CheckoutError::Validation(format!(
                    "items[{}].restock_preference.remind_in_days must be between {} and {}",
                    index, MIN_REMIND_IN_DAYS, MAX_REMIND_IN_DAYS
                )));
            }
        }
    }
    Ok(())
}

impl CreateSessionRequest {
    pub fn validate(&self) -> CheckoutResult<()> {
        validate_items(&self.items)
    }
}

impl UpdateSessionRequest {
    pub fn validate(&self) -> CheckoutResult<()> {
        match &self.items {
            Some(items) => validate_items(items),
            None => Ok(()),
        }
    }

    /// Requested option id, ignoring empty strings.
    pub fn requested_option_id(&self) -> Option<&str> {
        self.fulfillment_option_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}

impl CompleteSessionRequest {
    pub fn validate(&self) -> CheckoutResult<()> {
        if self.payment_data.token.expose().trim().is_empty() {
            return Err(CheckoutError::Validation(
                "payment_data.token must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl FeedbackRequest {
    pub fn validate(&self) -> CheckoutResult<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(CheckoutError::Validation(format!(
                "rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
        Ok(())
    }
}
