//! Summary and history formatting for terminal output

use super::record::{display_date, truncate, DisplayOptions};
use crate::models::RecordKind;
use crate::store::{HistoryEntry, Summary};

/// Format the income/expense totals and resulting balance
pub fn format_summary(summary: &Summary, opts: &DisplayOptions) -> String {
    let symbol = &opts.currency_symbol;
    let mut output = String::new();

    output.push_str("Summary\n");
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!(
        "Total Income:    {:>14}  ({} records)\n",
        summary.total_income.format_with_symbol(symbol),
        summary.income_count
    ));
    output.push_str(&format!(
        "Total Expenses:  {:>14}  ({} records)\n",
        summary.total_expenses.format_with_symbol(symbol),
        summary.expense_count
    ));
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!(
        "Total Balance:   {:>14}\n",
        summary.total_balance.format_with_symbol(symbol)
    ));

    output
}

/// Format the recent-history view; expenses are shown as negative amounts
pub fn format_history(entries: &[HistoryEntry<'_>], opts: &DisplayOptions) -> String {
    if entries.is_empty() {
        return "No recent transactions.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Recent History\n");
    output.push_str(&format!(
        "{:<10}  {:<8}  {:<24}  {:>12}\n",
        "Date", "Type", "Title", "Amount"
    ));
    output.push_str(&separator(60));
    output.push('\n');

    for entry in entries {
        let kind = match entry.kind {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
        };
        output.push_str(&format!(
            "{:<10}  {:<8}  {:<24}  {:>12}\n",
            opts.format_date(display_date(entry.record)),
            kind,
            truncate(&entry.record.title, 24),
            entry.signed_amount().format_with_symbol(&opts.currency_symbol),
        ));
    }

    output
}

fn separator(width: usize) -> String {
    "-".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Record, RecordId};
    use serde_json::Map;

    fn record(title: &str, cents: i64) -> Record {
        Record {
            id: RecordId::parse(title).unwrap(),
            title: title.to_string(),
            amount: Money::from_cents(cents),
            date: None,
            category: String::new(),
            description: String::new(),
            created_at: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_format_summary() {
        let summary = Summary {
            total_income: Money::from_cents(10_000),
            total_expenses: Money::from_cents(4_000),
            total_balance: Money::from_cents(6_000),
            income_count: 1,
            expense_count: 1,
        };
        let out = format_summary(&summary, &DisplayOptions::default());

        assert!(out.contains("Total Income:"));
        assert!(out.contains("$100.00"));
        assert!(out.contains("$40.00"));
        assert!(out.contains("Total Balance:           $60.00"));
    }

    #[test]
    fn test_format_history_signs_expenses() {
        let salary = record("Salary", 250_000);
        let rent = record("Rent", 120_000);
        let entries = vec![
            HistoryEntry {
                kind: RecordKind::Expense,
                record: &rent,
            },
            HistoryEntry {
                kind: RecordKind::Income,
                record: &salary,
            },
        ];

        let out = format_history(&entries, &DisplayOptions::default());
        let rent_line = out.lines().find(|l| l.contains("Rent")).unwrap();
        let salary_line = out.lines().find(|l| l.contains("Salary")).unwrap();

        assert!(rent_line.contains("expense"));
        assert!(rent_line.contains("-$1200.00"));
        assert!(salary_line.contains("$2500.00"));
        assert!(!salary_line.contains("-$"));
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(
            format_history(&[], &DisplayOptions::default()),
            "No recent transactions.\n"
        );
    }
}
