//! Recent-activity view across both collections

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{Money, Record, RecordKind};

/// Number of entries `TrackerStore::transaction_history` returns
pub const HISTORY_LIMIT: usize = 5;

/// One row of the merged history, tagged with the collection it came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryEntry<'a> {
    pub kind: RecordKind,
    #[serde(flatten)]
    pub record: &'a Record,
}

impl HistoryEntry<'_> {
    /// Amount with the sign of its effect on the balance
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            RecordKind::Income => self.record.amount,
            RecordKind::Expense => -self.record.amount,
        }
    }
}

/// Merge incomes then expenses, newest first, keeping at most `limit`.
///
/// The sort is stable, so records with equal timestamps keep merge order
/// (incomes ahead of expenses). Records without a timestamp go last.
pub fn merge_recent<'a>(
    incomes: &'a [Record],
    expenses: &'a [Record],
    limit: usize,
) -> Vec<HistoryEntry<'a>> {
    let mut merged: Vec<HistoryEntry<'a>> = incomes
        .iter()
        .map(|record| HistoryEntry {
            kind: RecordKind::Income,
            record,
        })
        .chain(expenses.iter().map(|record| HistoryEntry {
            kind: RecordKind::Expense,
            record,
        }))
        .collect();

    merged.sort_by(|a, b| newest_first(a.record, b.record));
    merged.truncate(limit);
    merged
}

fn newest_first(a: &Record, b: &Record) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
