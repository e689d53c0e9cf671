//! Client-side state container
//!
//! `TrackerStore` caches the server's income and expense collections and
//! derives totals and recent history from them. Every mutation goes to the
//! server first and then replaces the affected collection with a fresh
//! fetch; nothing is merged locally.

pub mod history;

use serde::Serialize;
use tracing::{debug, warn};

use crate::api::TrackerApi;
use crate::error::TrackerResult;
use crate::models::{Money, NewRecord, Record, RecordId, RecordKind};

pub use history::{merge_recent, HistoryEntry, HISTORY_LIMIT};

/// Aggregate view of the cached collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_balance: Money,
    pub income_count: usize,
    pub expense_count: usize,
}

/// Cache of server-side records plus the last add failure
pub struct TrackerStore<A> {
    api: A,
    incomes: Vec<Record>,
    expenses: Vec<Record>,
    error: Option<String>,
}

impl<A: TrackerApi> TrackerStore<A> {
    /// Create an empty store; nothing is fetched until asked
    pub fn new(api: A) -> Self {
        Self {
            api,
            incomes: Vec::new(),
            expenses: Vec::new(),
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn incomes(&self) -> &[Record] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[Record] {
        &self.expenses
    }

    /// Cached collection for one kind
    pub fn records(&self, kind: RecordKind) -> &[Record] {
        match kind {
            RecordKind::Income => &self.incomes,
            RecordKind::Expense => &self.expenses,
        }
    }

    // ============= Incomes =============

    pub async fn add_income(&mut self, record: &NewRecord) -> TrackerResult<()> {
        self.add(RecordKind::Income, record).await
    }

    pub async fn get_incomes(&mut self) -> TrackerResult<()> {
        self.fetch(RecordKind::Income).await
    }

    pub async fn delete_income(&mut self, id: &RecordId) -> TrackerResult<()> {
        self.delete(RecordKind::Income, id).await
    }

    pub fn total_income(&self) -> Money {
        self.incomes.iter().map(|r| r.amount).sum()
    }

    // ============= Expenses =============

    pub async fn add_expense(&mut self, record: &NewRecord) -> TrackerResult<()> {
        self.add(RecordKind::Expense, record).await
    }

    pub async fn get_expenses(&mut self) -> TrackerResult<()> {
        self.fetch(RecordKind::Expense).await
    }

    pub async fn delete_expense(&mut self, id: &RecordId) -> TrackerResult<()> {
        self.delete(RecordKind::Expense, id).await
    }

    pub fn total_expenses(&self) -> Money {
        self.expenses.iter().map(|r| r.amount).sum()
    }

    // ============= Derived views =============

    pub fn total_balance(&self) -> Money {
        self.total_income() - self.total_expenses()
    }

    /// The five most recent records across both collections, newest first
    pub fn transaction_history(&self) -> Vec<HistoryEntry<'_>> {
        self.recent_history(HISTORY_LIMIT)
    }

    pub fn recent_history(&self, limit: usize) -> Vec<HistoryEntry<'_>> {
        merge_recent(&self.incomes, &self.expenses, limit)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_income: self.total_income(),
            total_expenses: self.total_expenses(),
            total_balance: self.total_balance(),
            income_count: self.incomes.len(),
            expense_count: self.expenses.len(),
        }
    }

    // ============= Error state =============

    /// Message from the most recent failed add, if not yet cleared
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: Option<String>) {
        self.error = message;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ============= Shared plumbing =============

    /// Fetch and refresh both collections
    pub async fn refresh(&mut self) -> TrackerResult<()> {
        self.get_incomes().await?;
        self.get_expenses().await
    }

    /// Create a record of `kind`, then re-fetch that collection.
    ///
    /// A rejected create is remembered in the error state and the cached
    /// collection stays as it was. A failure of the follow-up fetch is
    /// returned but not recorded.
    pub async fn add(&mut self, kind: RecordKind, record: &NewRecord) -> TrackerResult<()> {
        if let Err(err) = self.api.add(kind, record).await {
            let message = err.user_message();
            warn!(kind = kind.as_str(), %message, "add rejected");
            self.error = Some(message);
            return Err(err);
        }

        self.fetch(kind).await
    }

    /// Replace the cached collection of `kind` with the server's copy
    pub async fn fetch(&mut self, kind: RecordKind) -> TrackerResult<()> {
        let records = self.api.list(kind).await?;
        debug!(kind = kind.as_str(), count = records.len(), "collection refreshed");

        match kind {
            RecordKind::Income => self.incomes = records,
            RecordKind::Expense => self.expenses = records,
        }
        Ok(())
    }

    /// Delete a record, then re-fetch without inspecting the delete response
    pub async fn delete(&mut self, kind: RecordKind, id: &RecordId) -> TrackerResult<()> {
        self.api.delete(kind, id).await?;
        self.fetch(kind).await
    }
}
