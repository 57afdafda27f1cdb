use acp_shared::Masked;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a checkout session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    ReadyForPayment,
    Completed,
    Canceled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::ReadyForPayment => "ready_for_payment",
            SessionStatus::Completed => "completed",
            SessionStatus::Canceled => "canceled",
        }
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Canceled)
    }

    /// Status implied by whether a fulfillment address is known.
    pub fn for_address(has_address: bool) -> Self {
        if has_address {
            SessionStatus::ReadyForPayment
        } else {
            SessionStatus::InProgress
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestockPreference {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remind_in_days: Option<u16>,
}

/// A requested catalog SKU and quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restock_preference: Option<RestockPreference>,
}

impl Item {
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
            restock_preference: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_one: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_two: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

/// Buyer details supplied by the agent. Known fields are typed; anything else
/// is carried through untouched in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Buyer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Masked<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Masked<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One priced entry derived from a requested item. All amounts are in minor units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub id: String,
    pub item: Item,
    pub base_amount: i64,
    pub discount: i64,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TotalKind {
    ItemsBaseAmount,
    Tax,
    Shipping,
    Total,
}

impl TotalKind {
    pub fn display_text(&self) -> &'static str {
        match self {
            TotalKind::ItemsBaseAmount => "Item(s) total",
            TotalKind::Tax => "Tax",
            TotalKind::Shipping => "Shipping",
            TotalKind::Total => "Total",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TotalsRow {
    #[serde(rename = "type")]
    pub kind: TotalKind,
    pub display_text: String,
    pub amount: i64,
}

impl TotalsRow {
    pub fn new(kind: TotalKind, amount: i64) -> Self {
        Self {
            kind,
            display_text: kind.display_text().to_string(),
            amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FulfillmentOption {
    pub id: String,
    pub label: String,
    pub amount: i64,
    pub eta_days: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Info,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageCode {
    PaymentDeclined,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Plain,
}

/// User-facing message attached to a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<MessageCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub content_type: ContentType,
    pub content: String,
}

impl Message {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            kind: MessageType::Info,
            code: None,
            path: None,
            content_type: ContentType::Plain,
            content: content.into(),
        }
    }

    pub fn error(code: MessageCode, content: impl Into<String>) -> Self {
        Self {
            kind: MessageType::Error,
            code: Some(code),
            path: None,
            content_type: ContentType::Plain,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    TermsOfUse,
    PrivacyPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    #[serde(rename = "type")]
    pub kind: LinkType,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Stripe,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentProvider {
    pub provider: ProviderKind,
    pub supported_payment_methods: Vec<String>,
}

impl Default for PaymentProvider {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Stripe,
            supported_payment_methods: vec!["card".to_string()],
        }
    }
}

/// The checkout aggregate: a cart plus everything needed to pay for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    pub payment_provider: PaymentProvider,
    pub status: SessionStatus,
    pub currency: String,
    pub line_items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_address: Option<Address>,
    pub fulfillment_options: Vec<FulfillmentOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_option_id: Option<String>,
    pub totals: Vec<TotalsRow>,
    pub messages: Vec<Message>,
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

impl CheckoutSession {
    pub fn total_row(&self, kind: TotalKind) -> Option<&TotalsRow> {
        self.totals.iter().find(|row| row.kind == kind)
    }

    /// Amount to authorize at completion.
    pub fn grand_total(&self) -> Option<i64> {
        self.total_row(TotalKind::Total).map(|row| row.amount)
    }

    /// Items currently in the cart, as originally requested.
    pub fn requested_items(&self) -> Vec<Item> {
        self.line_items.iter().map(|li| li.item.clone()).collect()
    }
}
