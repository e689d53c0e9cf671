//! Record display formatting
//!
//! Formats cached income/expense collections for terminal output.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::{Record, RecordKind};

/// Currency and date preferences applied to every formatted row
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl From<&crate::config::Settings> for DisplayOptions {
    fn from(settings: &crate::config::Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }
}

impl DisplayOptions {
    /// Format a timestamp, falling back to ISO dates if the pattern is invalid
    pub fn format_date(&self, at: Option<DateTime<Utc>>) -> String {
        let Some(at) = at else {
            return "-".to_string();
        };

        let mut out = String::new();
        if write!(out, "{}", at.format(&self.date_format)).is_err() {
            out.clear();
            let _ = write!(out, "{}", at.format("%Y-%m-%d"));
        }
        out
    }
}

/// Date a record is displayed under: the user's date, else the creation time
pub fn display_date(record: &Record) -> Option<DateTime<Utc>> {
    record.date.or(record.created_at)
}

/// Format a single record as a table row
pub fn format_record_row(record: &Record, opts: &DisplayOptions) -> String {
    format!(
        "{:<24}  {:<10}  {:<20}  {:<14}  {:>12}",
        record.id.as_str(),
        opts.format_date(display_date(record)),
        truncate(&record.title, 20),
        truncate(&record.category, 14),
        record.amount.format_with_symbol(&opts.currency_symbol),
    )
}

/// Format a collection as a table with a total line
pub fn format_record_list(kind: RecordKind, records: &[Record], opts: &DisplayOptions) -> String {
    if records.is_empty() {
        return format!("No {} records found.\n", kind.as_str());
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<24}  {:<10}  {:<20}  {:<14}  {:>12}\n",
        "ID", "Date", "Title", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(88));
    output.push('\n');

    for record in records {
        output.push_str(&format_record_row(record, opts));
        output.push('\n');
    }

    let total: crate::models::Money = records.iter().map(|r| r.amount).sum();
    output.push_str(&"-".repeat(88));
    output.push('\n');
    output.push_str(&format!(
        "{:<74}  {:>12}\n",
        format!("Total {} ({} records)", kind.as_str(), records.len()),
        total.format_with_symbol(&opts.currency_symbol)
    ));

    output
}

/// Truncate a string to a maximum display length
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
