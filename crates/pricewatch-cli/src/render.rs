//! Plain-text rendering for terminal output.

use std::fmt::Write as _;

use pricewatch_core::{DeliveryOption, ProductRecord, Report};
use pricewatch_store::LogEntry;

/// Formats a whole-unit price the way `es-AR` locales show it:
/// `$ 45.999 ARS`.
pub(crate) fn format_price(price: u64, currency: &str) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("$ {grouped} {currency}")
}

fn delivery_line(label: &str, option: &DeliveryOption) -> String {
    let mut line = format!("{label}: ");
    line.push_str(if option.is_free_delivery { "free" } else { "paid" });
    if let Some(date) = &option.date {
        let _ = write!(line, ", {date}");
    }
    if let Some(remaining) = &option.time_remaining {
        let _ = write!(line, " ({remaining})");
    }
    line
}

/// Multi-line summary of one checked listing.
pub(crate) fn summary(product: &ProductRecord) -> String {
    let title = if product.title.is_empty() {
        "(untitled)"
    } else {
        product.title.as_str()
    };
    let stock = if product.available {
        "in stock"
    } else {
        "out of stock"
    };

    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "  {}", product.url);
    let _ = writeln!(
        out,
        "  {}  {stock}",
        format_price(product.price, &product.currency)
    );
    let _ = writeln!(out, "  {}", delivery_line("home", &product.delivery.home));
    let _ = writeln!(out, "  {}", delivery_line("pickup", &product.delivery.pickup));
    out
}

pub(crate) fn log_line(entry: &LogEntry) -> String {
    let result = if entry.success { "ok" } else { "failed" };
    let mut line = format!("{:<27}{result:<8}{}", entry.timestamp.to_rfc3339(), entry.url);
    if let Some(error) = &entry.error {
        let _ = write!(line, "  {error}");
    }
    line
}

pub(crate) fn report_line(report: &Report) -> String {
    format!(
        "{}  {}  {}  {}",
        report.timestamp.to_rfc3339(),
        format_price(report.product.price, &report.product.currency),
        report.product.title,
        report.product.url
    )
}
