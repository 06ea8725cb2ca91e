use pricewatch_core::{AppConfig, ProductRecord, SiteProfile};

use crate::client::PageClient;
use crate::error::ScraperError;
use crate::extract::Extractor;

/// Entry point for a single listing check: one fetch, one parse pass.
///
/// Holds no mutable state, so one checker can serve concurrent callers
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ProductChecker {
    client: PageClient,
    extractor: Extractor,
}

impl ProductChecker {
    #[must_use]
    pub fn new(client: PageClient, extractor: Extractor) -> Self {
        Self { client, extractor }
    }

    /// Builds a checker from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built and
    /// [`ScraperError::InvalidProfile`] if the site profile is unusable.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::with_profile(
            &config.user_agent,
            config.request_timeout_secs,
            config.profile.clone(),
        )
    }

    /// # Errors
    ///
    /// Same as [`ProductChecker::from_config`].
    pub fn with_profile(
        user_agent: &str,
        timeout_secs: Option<u64>,
        profile: SiteProfile,
    ) -> Result<Self, ScraperError> {
        Ok(Self::new(
            PageClient::new(user_agent, timeout_secs)?,
            Extractor::new(profile)?,
        ))
    }

    /// Fetches `url` and extracts its product record.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Network`] when the fetch fails, otherwise any
    /// extraction error from [`Extractor::extract`].
    pub async fn check(&self, url: &str) -> Result<ProductRecord, ScraperError> {
        let html = self.client.fetch_html(url).await?;
        tracing::debug!(url, bytes = html.len(), "fetched listing page");
        self.extractor.extract_html(url, &html)
    }
}
