use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Product not found at URL: {url}")]
    ProductNotFound { url: String },

    #[error("Price content not found")]
    MissingPriceContent { url: String },

    #[error("Invalid price format")]
    InvalidPrice { url: String, content: String },

    #[error("{message}")]
    Network {
        url: String,
        code: String,
        message: String,
    },

    #[error("invalid site profile {field}: {reason}")]
    InvalidProfile { field: &'static str, reason: String },
}

/// The three outcomes a failed check is reported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// The page has no price marker; the listing is presumed gone.
    ProductNotFound,
    /// A marker was present but unusable, or extraction failed otherwise.
    ParseError,
    /// The fetch itself failed.
    NetworkError,
}

impl ScraperError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScraperError::ProductNotFound { .. } => ErrorKind::ProductNotFound,
            ScraperError::Http(_) | ScraperError::Network { .. } => ErrorKind::NetworkError,
            ScraperError::MissingPriceContent { .. }
            | ScraperError::InvalidPrice { .. }
            | ScraperError::InvalidProfile { .. } => ErrorKind::ParseError,
        }
    }

    /// Machine-readable code. For network failures this is the transport's
    /// own code, e.g. `ECONNREFUSED`.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            ScraperError::Network { code, .. } => code,
            ScraperError::Http(_) => crate::classify::GENERIC_NETWORK_CODE,
            ScraperError::ProductNotFound { .. } => "PRODUCT_NOT_FOUND",
            ScraperError::MissingPriceContent { .. } | ScraperError::InvalidPrice { .. } => {
                "PARSE_ERROR"
            }
            ScraperError::InvalidProfile { .. } => "INVALID_PROFILE",
        }
    }
}
