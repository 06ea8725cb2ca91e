//! HTTP client that retrieves listing pages.

use std::time::Duration;

use reqwest::Client;

use crate::classify::transport_code;
use crate::error::ScraperError;

/// Fetches listing HTML with a fixed browser identity.
///
/// Each call issues exactly one GET. Failures are terminal for that call;
/// there is no retry or backoff.
#[derive(Debug, Clone)]
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` sending `user_agent` on every request.
    ///
    /// `timeout_secs` of `None` keeps the transport's default behaviour.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(user_agent: &str, timeout_secs: Option<u64>) -> Result<Self, ScraperError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetches the raw body of `url` as text.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Network`] for any transport failure, including
    /// non-2xx responses. The error's `code` is derived from the failure
    /// (e.g. `ECONNREFUSED`, `ERR_BAD_REQUEST`), falling back to
    /// `NETWORK_ERROR`.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let network_error = |e: reqwest::Error| {
            let code = transport_code(&e);
            tracing::debug!(url, code, error = %e, "listing fetch failed");
            ScraperError::Network {
                url: url.to_owned(),
                code: code.to_owned(),
                message: e.to_string(),
            }
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(network_error)?;

        response.text().await.map_err(network_error)
    }
}
