//! Marker and locale tables describing how one marketplace lays out a
//! listing page.
//!
//! The built-in profile targets Mercado Libre Argentina. A YAML file can
//! override any subset of keys; omitted keys keep the built-in values:
//!
//! ```yaml
//! markers:
//!   out_of_stock: ".ui-pdp-stock-message"
//! locale:
//!   free_keyword: "grátis"
//!   fallback_currency: "BRL"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Currency reported when the page carries no currency marker.
pub const DEFAULT_CURRENCY: &str = "ARS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    pub markers: Markers,
    pub locale: LocaleRules,
}

/// CSS selectors locating each field. Attribute-valued fields read the
/// `content` attribute of the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub price: String,
    pub currency: String,
    pub title: String,
    /// Presence alone marks the listing as unavailable.
    pub out_of_stock: String,
    pub home_container: String,
    pub pickup_container: String,
    /// Descriptive text element inside either delivery container.
    pub summary_text: String,
    /// Countdown element inside the home-delivery container.
    pub countdown: String,
    /// Attribute holding machine-readable values on meta markers.
    pub value_attribute: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            price: r#"meta[itemprop="price"]"#.to_string(),
            currency: r#"meta[itemprop="priceCurrency"]"#.to_string(),
            title: r#"meta[property="og:title"]"#.to_string(),
            out_of_stock: ".ui-pdp-stock-message".to_string(),
            home_container: ".ui-pdp-container__row--shipping-summary".to_string(),
            pickup_container: ".ui-pdp-container__row--pick-up-summary".to_string(),
            summary_text: ".ui-pdp-media__title".to_string(),
            countdown: "#MORE_THAN_TWO_HOURS_WITH_MIN".to_string(),
            value_attribute: "content".to_string(),
        }
    }
}

/// Natural-language keywords and patterns for the page's locale.
///
/// Patterns are regular expressions whose first capture group is the date
/// fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleRules {
    /// Matched case-insensitively as a substring of the summary text.
    pub free_keyword: String,
    pub home_date_pattern: String,
    pub pickup_date_pattern: String,
    pub fallback_currency: String,
}

impl Default for LocaleRules {
    fn default() -> Self {
        Self {
            free_keyword: "gratis".to_string(),
            home_date_pattern: "el ([^,]+)".to_string(),
            pickup_date_pattern: "entre el (.+?) en correo".to_string(),
            fallback_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl SiteProfile {
    /// Loads a profile from a YAML file, filling omitted keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ProfileIo`] when the file cannot be read and
    /// [`ConfigError::ProfileParse`] when it is not valid profile YAML.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ProfileIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw).map_err(|source| ConfigError::ProfileParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parses a profile from YAML text. An empty document yields the
    /// built-in profile.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_yaml` error for malformed input.
    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }
}
