use std::net::SocketAddr;
use std::path::PathBuf;

use crate::profile::SiteProfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// JSON array file receiving one entry per check outcome.
    pub log_path: PathBuf,
    /// JSON array file holding saved reports, newest first.
    pub history_path: PathBuf,
    /// Substring every accepted listing URL must contain.
    pub allowed_domain: String,
    pub user_agent: String,
    /// `None` keeps the HTTP client's own default.
    pub request_timeout_secs: Option<u64>,
    /// Minimum age of the last logged success before another is logged.
    pub log_window: chrono::Duration,
    pub profile: SiteProfile,
}
