use chrono::{DateTime, Utc};

use pricewatch_core::AppConfig;
use pricewatch_store::{LogEntry, LogStore, ReportHistory};

use crate::render;

/// # Errors
///
/// Returns an error if the log file cannot be read.
pub(crate) async fn run_logs(config: &AppConfig, limit: Option<usize>) -> anyhow::Result<()> {
    let entries = LogStore::new(&config.log_path).read_all().await?;
    if entries.is_empty() {
        println!("no checks logged yet in {}", config.log_path.display());
        return Ok(());
    }

    let header = format!("{:<27}{:<8}URL", "TIMESTAMP", "RESULT");
    println!("{header}");
    for entry in tail(&entries, limit) {
        println!("{}", render::log_line(entry));
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the history file cannot be read.
pub(crate) async fn run_history_list(config: &AppConfig) -> anyhow::Result<()> {
    let reports = ReportHistory::new(&config.history_path).list_all().await?;
    if reports.is_empty() {
        println!("no saved reports; run `check <url> --save` first");
        return Ok(());
    }

    for report in &reports {
        println!("{}", render::report_line(report));
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the history file cannot be rewritten or no report
/// carries `timestamp`.
pub(crate) async fn run_history_remove(
    config: &AppConfig,
    timestamp: DateTime<Utc>,
) -> anyhow::Result<()> {
    let removed = ReportHistory::new(&config.history_path)
        .remove(timestamp)
        .await?;
    if !removed {
        anyhow::bail!("no saved report at {}", timestamp.to_rfc3339());
    }
    println!("removed report {}", timestamp.to_rfc3339());
    Ok(())
}

/// The last `limit` entries, keeping file order.
fn tail(entries: &[LogEntry], limit: Option<usize>) -> &[LogEntry] {
    match limit {
        Some(n) => &entries[entries.len().saturating_sub(n)..],
        None => entries,
    }
}
