use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::product::{DeliveryOptions, ProductRecord};

const UNKNOWN_TITLE: &str = "Unknown Product";

/// A saved check result as shown in the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Also the report's identity within the history.
    pub timestamp: DateTime<Utc>,
    pub product: ReportProduct,
}

/// Display-oriented copy of a [`ProductRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportProduct {
    pub title: String,
    pub url: String,
    pub price: u64,
    pub currency: String,
    pub available: bool,
    pub delivery: DeliveryOptions,
}

impl Report {
    /// Builds a report for `record`, substituting a placeholder for a
    /// missing title.
    #[must_use]
    pub fn from_record(record: &ProductRecord, timestamp: DateTime<Utc>) -> Self {
        let title = if record.title.is_empty() {
            UNKNOWN_TITLE.to_string()
        } else {
            record.title.clone()
        };

        Self {
            timestamp,
            product: ReportProduct {
                title,
                url: record.url.clone(),
                price: record.price,
                currency: record.currency.clone(),
                available: record.available,
                delivery: record.delivery.clone(),
            },
        }
    }
}
