//! Field extraction from a listing page.
//!
//! Each field is an independent lookup against a [`FieldLocator`]. Only the
//! price is mandatory; every other lookup degrades to a default.

use regex::Regex;

use pricewatch_core::{DeliveryKind, DeliveryOption, Markers, ProductRecord, SiteProfile};

use crate::assemble::assemble;
use crate::error::ScraperError;
use crate::locator::{check_marker, FieldLocator, HtmlDocument};

/// Raw field values pulled from a page, before defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub price: u64,
    pub currency: Option<String>,
    pub title: Option<String>,
    pub available: bool,
    pub home: DeliveryOption,
    pub pickup: DeliveryOption,
}

/// Compiled form of a [`SiteProfile`].
#[derive(Debug, Clone)]
pub struct Extractor {
    markers: Markers,
    free_keyword: String,
    home_date: Regex,
    pickup_date: Regex,
    fallback_currency: String,
}

impl Extractor {
    /// Compiles the profile's patterns and checks its markers.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidProfile`] when a marker is not a valid
    /// selector, a date pattern does not compile or lacks a capture group,
    /// or the free-delivery keyword is empty.
    pub fn new(profile: SiteProfile) -> Result<Self, ScraperError> {
        let SiteProfile { markers, locale } = profile;

        for (field, marker) in [
            ("markers.price", &markers.price),
            ("markers.currency", &markers.currency),
            ("markers.title", &markers.title),
            ("markers.out_of_stock", &markers.out_of_stock),
            ("markers.home_container", &markers.home_container),
            ("markers.pickup_container", &markers.pickup_container),
            ("markers.summary_text", &markers.summary_text),
            ("markers.countdown", &markers.countdown),
        ] {
            check_marker(marker)
                .map_err(|reason| ScraperError::InvalidProfile { field, reason })?;
        }

        if locale.free_keyword.trim().is_empty() {
            return Err(ScraperError::InvalidProfile {
                field: "locale.free_keyword",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(Self {
            home_date: date_pattern("locale.home_date_pattern", &locale.home_date_pattern)?,
            pickup_date: date_pattern("locale.pickup_date_pattern", &locale.pickup_date_pattern)?,
            free_keyword: locale.free_keyword.to_lowercase(),
            fallback_currency: locale.fallback_currency,
            markers,
        })
    }

    /// Parses `html` and extracts the listing at `url`.
    ///
    /// The parsed document lives only for the duration of this call.
    ///
    /// # Errors
    ///
    /// See [`Extractor::extract`].
    pub fn extract_html(&self, url: &str, html: &str) -> Result<ProductRecord, ScraperError> {
        let doc = HtmlDocument::parse(html);
        self.extract(url, &doc)
    }

    /// Extracts and assembles the product record for `url`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::ProductNotFound`] — the page has no price marker.
    /// - [`ScraperError::MissingPriceContent`] — the price marker has no value.
    /// - [`ScraperError::InvalidPrice`] — the value is not a whole number.
    pub fn extract<L: FieldLocator>(
        &self,
        url: &str,
        doc: &L,
    ) -> Result<ProductRecord, ScraperError> {
        let fields = self.extract_fields(url, doc)?;
        Ok(assemble(url, fields, &self.fallback_currency))
    }

    /// Runs every field lookup without applying defaults.
    ///
    /// # Errors
    ///
    /// Fails only on the price lookup; see [`Extractor::extract`].
    pub fn extract_fields<L: FieldLocator>(
        &self,
        url: &str,
        doc: &L,
    ) -> Result<ExtractedFields, ScraperError> {
        let price = self.price(url, doc)?;

        let fields = ExtractedFields {
            price,
            currency: self.meta_value(doc, &self.markers.currency),
            title: self.meta_value(doc, &self.markers.title),
            available: !doc.exists(&self.markers.out_of_stock),
            home: self.home_delivery(doc),
            pickup: self.pickup_delivery(doc),
        };

        tracing::debug!(
            url,
            price = fields.price,
            available = fields.available,
            home_free = fields.home.is_free_delivery,
            pickup_free = fields.pickup.is_free_delivery,
            "extracted listing fields"
        );

        Ok(fields)
    }

    /// A page without the price marker is treated as a removed listing, not
    /// as malformed markup.
    fn ensure_listing_present<L: FieldLocator>(
        &self,
        url: &str,
        doc: &L,
    ) -> Result<(), ScraperError> {
        if doc.exists(&self.markers.price) {
            Ok(())
        } else {
            Err(ScraperError::ProductNotFound {
                url: url.to_owned(),
            })
        }
    }

    fn price<L: FieldLocator>(&self, url: &str, doc: &L) -> Result<u64, ScraperError> {
        self.ensure_listing_present(url, doc)?;

        let content = doc
            .attribute(&self.markers.price, &self.markers.value_attribute)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ScraperError::MissingPriceContent {
                url: url.to_owned(),
            })?;

        parse_price(&content).ok_or_else(|| ScraperError::InvalidPrice {
            url: url.to_owned(),
            content,
        })
    }

    fn meta_value<L: FieldLocator>(&self, doc: &L, marker: &str) -> Option<String> {
        doc.attribute(marker, &self.markers.value_attribute)
            .filter(|v| !v.is_empty())
    }

    fn home_delivery<L: FieldLocator>(&self, doc: &L) -> DeliveryOption {
        let mut home = DeliveryOption::new(DeliveryKind::Delivery);

        let Some(text) = doc.text_within(&self.markers.home_container, &self.markers.summary_text)
        else {
            return home;
        };

        home.is_free_delivery = self.mentions_free(&text);
        home.date = first_capture(&self.home_date, &text);
        home.time_remaining = doc
            .text_within(&self.markers.home_container, &self.markers.countdown)
            .filter(|t| !t.is_empty());

        home
    }

    fn pickup_delivery<L: FieldLocator>(&self, doc: &L) -> DeliveryOption {
        let mut pickup = DeliveryOption::new(DeliveryKind::Pickup);

        let Some(text) =
            doc.text_within(&self.markers.pickup_container, &self.markers.summary_text)
        else {
            return pickup;
        };

        pickup.is_free_delivery = self.mentions_free(&text);
        pickup.date = first_capture(&self.pickup_date, &text);

        pickup
    }

    fn mentions_free(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.free_keyword)
    }
}

fn date_pattern(field: &'static str, pattern: &str) -> Result<Regex, ScraperError> {
    let regex = Regex::new(pattern).map_err(|e| ScraperError::InvalidProfile {
        field,
        reason: e.to_string(),
    })?;
    // captures_len counts the implicit whole-match group.
    if regex.captures_len() < 2 {
        return Err(ScraperError::InvalidProfile {
            field,
            reason: "pattern needs a capture group for the date".to_string(),
        });
    }
    Ok(regex)
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|date| !date.is_empty())
}

/// Parses a price in whole currency units.
///
/// Accepts digits with an optional all-digit fractional part, which is
/// truncated (`"45999.50"` → `45999`). Signs, separators and anything else
/// are rejected, including trailing garbage after valid leading digits
/// (`"45999abc"`, `"12,5"`): a price marker carrying such content is not
/// trusted as a price.
pub(crate) fn parse_price(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (raw, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if !all_digits(whole) || fraction.is_some_and(|f| !all_digits(f)) {
        return None;
    }

    whole.parse().ok()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
