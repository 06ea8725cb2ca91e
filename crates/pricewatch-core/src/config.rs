use std::path::{Path, PathBuf};

use crate::app_config::{AppConfig, Environment};
use crate::profile::SiteProfile;
use crate::ConfigError;

/// Browser identity sent with every listing fetch. Marketplaces serve a
/// reduced page to unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or the site profile cannot be
/// loaded.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or the site profile cannot be
/// loaded.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a working
/// development configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("PRICEWATCH_ENV", "development"))?;

    let bind_addr = or_default("PRICEWATCH_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PRICEWATCH_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("PRICEWATCH_LOG_LEVEL", "info");
    let log_path = PathBuf::from(or_default("PRICEWATCH_LOG_PATH", "./logs/scraping.json"));
    let history_path = PathBuf::from(or_default("PRICEWATCH_HISTORY_PATH", "./logs/reports.json"));

    let allowed_domain = or_default("PRICEWATCH_ALLOWED_DOMAIN", "mercadolibre.com.ar");
    if allowed_domain.trim().is_empty() {
        return Err(invalid(
            "PRICEWATCH_ALLOWED_DOMAIN",
            "must not be empty".to_string(),
        ));
    }

    let user_agent = or_default("PRICEWATCH_USER_AGENT", DEFAULT_USER_AGENT);

    let request_timeout_secs = match lookup("PRICEWATCH_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("PRICEWATCH_REQUEST_TIMEOUT_SECS", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let log_window = suppress_window(parse_u64("PRICEWATCH_LOG_SUPPRESS_SECS", "3600")?)
        .ok_or_else(|| {
            invalid(
                "PRICEWATCH_LOG_SUPPRESS_SECS",
                "out of range for a duration".to_string(),
            )
        })?;

    let profile = match lookup("PRICEWATCH_PROFILE_PATH") {
        Ok(path) => SiteProfile::from_yaml_file(Path::new(&path))?,
        Err(_) => SiteProfile::default(),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        log_path,
        history_path,
        allowed_domain,
        user_agent,
        request_timeout_secs,
        log_window,
        profile,
    })
}

/// `None` when `secs` exceeds what `chrono::Duration` can hold.
fn suppress_window(secs: u64) -> Option<chrono::Duration> {
    chrono::Duration::try_seconds(i64::try_from(secs).ok()?)
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICEWATCH_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
