use acp_shared::Masked;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::checkout::{Address, ProviderKind};

/// Payment details supplied with a completion request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentData {
    pub token: Masked<String>,
    pub provider: ProviderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
}

/// Approval returned by the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Authorization {
    pub auth_id: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),
    #[error("Payment provider unavailable: {0}")]
    Unavailable(String),
    #[error("Payment authorization timed out after {0}ms")]
    Timeout(u64),
}

#[async_trait]
pub trait PaymentAuthorizer: Send + Sync {
    /// Authorize `amount` minor units against a payment token. Not retried.
    async fn authorize(
        &self,
        token: &Masked<String>,
        amount: i64,
        currency: &str,
    ) -> Result<Authorization, PaymentError>;
}
