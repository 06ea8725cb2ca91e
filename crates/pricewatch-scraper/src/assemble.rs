use pricewatch_core::{DeliveryOptions, ProductRecord};

use crate::extract::ExtractedFields;

/// Builds the canonical record from extracted fields.
///
/// Takes `fields` by value: a record can only be assembled once the price
/// lookup has succeeded. Missing currency falls back to `fallback_currency`,
/// a missing title becomes the empty string.
#[must_use]
pub fn assemble(url: &str, fields: ExtractedFields, fallback_currency: &str) -> ProductRecord {
    let ExtractedFields {
        price,
        currency,
        title,
        available,
        home,
        pickup,
    } = fields;

    ProductRecord {
        url: url.to_owned(),
        price,
        currency: currency.unwrap_or_else(|| fallback_currency.to_owned()),
        title: title.unwrap_or_default(),
        available,
        delivery: DeliveryOptions { home, pickup },
    }
}
