use anyhow::Context;
use chrono::Utc;

use pricewatch_core::{validate_listing_url, AppConfig, CoreError, Report};
use pricewatch_scraper::ProductChecker;
use pricewatch_store::{LogEntry, LogStore, ReportHistory};

use crate::render;

#[derive(Debug, Clone, Copy)]
pub(crate) struct CheckOptions {
    pub save: bool,
    pub json: bool,
}

/// Check one listing, record the outcome, and print the result.
///
/// Outcomes go to the same log file the server writes, under the same
/// suppression window for successes.
///
/// # Errors
///
/// Returns an error if the URL is rejected, the check fails, or the report
/// cannot be saved. Log store failures are reported but not fatal.
pub(crate) async fn run_check(
    config: &AppConfig,
    url: &str,
    options: CheckOptions,
) -> anyhow::Result<()> {
    let log_store = LogStore::new(&config.log_path);

    let url = match validate_listing_url(Some(url), &config.allowed_domain) {
        Ok(url) => url,
        Err(e) => {
            let logged_url = match &e {
                CoreError::MissingUrl => "invalid",
                CoreError::ForeignDomain { url, .. } => url.as_str(),
            };
            record(&log_store, LogEntry::failure(logged_url, e.to_string(), None)).await;
            return Err(e.into());
        }
    };

    let checker = ProductChecker::from_config(config)?;
    let product = match checker.check(url).await {
        Ok(product) => product,
        Err(e) => {
            tracing::warn!(url, code = e.code(), error = %e, "listing check failed");
            record(&log_store, LogEntry::failure(url, e.to_string(), None)).await;
            return Err(anyhow::anyhow!("{e} ({})", e.code()));
        }
    };

    match log_store
        .append_success_if_due(LogEntry::success(product.clone(), None), config.log_window)
        .await
    {
        Ok(true) => {}
        Ok(false) => tracing::debug!(url, "success already logged within window"),
        Err(e) => tracing::warn!(error = %e, "failed to write success log"),
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&product)?);
    } else {
        print!("{}", render::summary(&product));
    }

    if options.save {
        let report = Report::from_record(&product, Utc::now());
        let timestamp = report.timestamp;
        ReportHistory::new(&config.history_path)
            .append(report)
            .await
            .with_context(|| format!("saving report to {}", config.history_path.display()))?;
        println!("saved report {}", timestamp.to_rfc3339());
    }

    Ok(())
}

async fn record(log_store: &LogStore, entry: LogEntry) {
    if let Err(e) = log_store.append(entry).await {
        tracing::warn!(error = %e, "failed to write check log");
    }
}
