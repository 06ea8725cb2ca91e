pub mod app_config;
pub mod config;
pub mod product;
pub mod profile;
pub mod report;
pub mod validate;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_USER_AGENT};
pub use product::{DeliveryKind, DeliveryOption, DeliveryOptions, ProductRecord};
pub use profile::{LocaleRules, Markers, SiteProfile, DEFAULT_CURRENCY};
pub use report::{Report, ReportProduct};
pub use validate::validate_listing_url;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid Mercado Libre URL")]
    ForeignDomain { url: String, allowed_domain: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read site profile {path}: {source}")]
    ProfileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site profile {path}: {source}")]
    ProfileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
