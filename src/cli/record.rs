//! Income and expense CLI commands
//!
//! Both collections share one command shape; the `RecordKind` picked by the
//! top-level subcommand decides which endpoints are hit.

use chrono::NaiveDate;
use clap::Subcommand;

use super::OutputOptions;
use crate::api::TrackerApi;
use crate::display::format_record_list;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, NewRecord, RecordId, RecordKind};
use crate::store::TrackerStore;

/// Subcommands available under both `income` and `expense`
#[derive(Subcommand)]
pub enum RecordCommands {
    /// Add a new record
    Add {
        /// Short title (e.g., "Salary", "Groceries")
        title: String,
        /// Amount (e.g., "2500" or "42.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,
        /// Date of the record (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List all records
    List,
    /// Delete a record by its server id
    #[command(alias = "rm")]
    Delete {
        /// Record id as shown by `list`
        id: String,
    },
}

/// Handle an income or expense command
pub async fn handle_record_command<A: TrackerApi>(
    store: &mut TrackerStore<A>,
    kind: RecordKind,
    output: &OutputOptions,
    cmd: RecordCommands,
) -> TrackerResult<()> {
    match cmd {
        RecordCommands::Add {
            title,
            amount,
            category,
            description,
            date,
        } => {
            let body = build_new_record(kind, title, &amount, category, description, date)?;

            store.add(kind, &body).await?;

            if output.json {
                print_json(store.records(kind))?;
            } else {
                println!(
                    "Added {} '{}' ({})",
                    kind.as_str(),
                    body.title,
                    body.amount.format_with_symbol(&output.display.currency_symbol)
                );
                let total = match kind {
                    RecordKind::Income => store.total_income(),
                    RecordKind::Expense => store.total_expenses(),
                };
                println!(
                    "Total {}: {}",
                    kind.as_str(),
                    total.format_with_symbol(&output.display.currency_symbol)
                );
            }
        }

        RecordCommands::List => {
            store.fetch(kind).await?;

            if output.json {
                print_json(store.records(kind))?;
            } else {
                print!(
                    "{}",
                    format_record_list(kind, store.records(kind), &output.display)
                );
            }
        }

        RecordCommands::Delete { id } => {
            let id = RecordId::parse(&id)?;
            store.delete(kind, &id).await?;

            if output.json {
                print_json(store.records(kind))?;
            } else {
                println!(
                    "Deleted {} {} ({} remaining)",
                    kind.as_str(),
                    id,
                    store.records(kind).len()
                );
            }
        }
    }

    Ok(())
}

/// Parse and validate the arguments of an add command
pub fn build_new_record(
    kind: RecordKind,
    title: String,
    amount: &str,
    category: Option<String>,
    description: Option<String>,
    date: Option<String>,
) -> TrackerResult<NewRecord> {
    let amount = Money::parse(amount)
        .map_err(|e| TrackerError::Validation(format!("Invalid amount: {}", e)))?;

    let mut body = NewRecord::new(kind, title, amount);
    if let Some(category) = category {
        body = body.with_category(category);
    }
    if let Some(description) = description {
        body = body.with_description(description);
    }
    if let Some(date) = date {
        let parsed = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
            TrackerError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", date))
        })?;
        body = body.with_date(parsed);
    }

    body.validate()
        .map_err(|e| TrackerError::Validation(e.to_string()))?;

    Ok(body)
}

pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> TrackerResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_new_record() {
        let body = build_new_record(
            RecordKind::Expense,
            "Groceries".into(),
            "42.50",
            Some("food".into()),
            None,
            Some("2024-03-05".into()),
        )
        .unwrap();

        assert_eq!(body.kind, RecordKind::Expense);
        assert_eq!(body.amount.cents(), 4250);
        assert_eq!(body.category, "food");
        assert!(body.description.is_empty());
        assert_eq!(body.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_build_new_record_rejects_bad_input() {
        let bad_amount =
            build_new_record(RecordKind::Income, "Salary".into(), "lots", None, None, None);
        assert!(bad_amount.unwrap_err().is_validation());

        let bad_date = build_new_record(
            RecordKind::Income,
            "Salary".into(),
            "100",
            None,
            None,
            Some("05/03/2024".into()),
        );
        assert!(bad_date.unwrap_err().is_validation());

        let negative =
            build_new_record(RecordKind::Income, "Salary".into(), "-5", None, None, None);
        assert!(negative.unwrap_err().is_validation());
    }
}
