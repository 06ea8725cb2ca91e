use serde::{Deserialize, Serialize};

/// Snapshot of a single listing as observed at fetch time.
///
/// Field order is the serialization order; keep it stable so repeated checks
/// of identical markup produce identical JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// The checked address, echoed back unchanged.
    pub url: String,
    /// Listing price in whole currency units.
    pub price: u64,
    /// ISO 4217 code, e.g. `"ARS"`.
    pub currency: String,
    /// Listing title, empty when the page carries no preview title.
    pub title: String,
    pub available: bool,
    pub delivery: DeliveryOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOptions {
    pub home: DeliveryOption,
    pub pickup: DeliveryOption,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            home: DeliveryOption::new(DeliveryKind::Delivery),
            pickup: DeliveryOption::new(DeliveryKind::Pickup),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryKind {
    /// Shipped to the buyer's address.
    Delivery,
    /// Collected at a post office or pickup point.
    Pickup,
}

impl std::fmt::Display for DeliveryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryKind::Delivery => write!(f, "delivery"),
            DeliveryKind::Pickup => write!(f, "pickup"),
        }
    }
}

/// Delivery terms for one fulfilment channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOption {
    #[serde(rename = "type")]
    pub kind: DeliveryKind,
    pub is_free_delivery: bool,
    /// Free-text date or date range, e.g. `"10 de mayo"`.
    pub date: Option<String>,
    /// Countdown shown for same-day dispatch; only ever set on home delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<String>,
}

impl DeliveryOption {
    /// Baseline option used before any markup is inspected: not free, no
    /// date, no countdown.
    #[must_use]
    pub fn new(kind: DeliveryKind) -> Self {
        Self {
            kind,
            is_free_delivery: false,
            date: None,
            time_remaining: None,
        }
    }
}
