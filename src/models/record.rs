//! Income and expense records
//!
//! A record is whatever the remote API returns for one income or expense
//! entry. Only the fields the client computes with are typed; anything else
//! the server sends is kept in `extra` so nothing is lost on display or
//! re-serialization.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::ids::RecordId;
use super::money::Money;

/// Which collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    /// Endpoint that creates a record of this kind
    pub fn add_endpoint(&self) -> &'static str {
        match self {
            Self::Income => "add-income",
            Self::Expense => "add-expense",
        }
    }

    /// Endpoint that lists every record of this kind
    pub fn list_endpoint(&self) -> &'static str {
        match self {
            Self::Income => "get-incomes",
            Self::Expense => "get-expenses",
        }
    }

    /// Endpoint prefix for deletion; the record id is appended as a path segment
    pub fn delete_endpoint(&self) -> &'static str {
        match self {
            Self::Income => "delete-income",
            Self::Expense => "delete-expense",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A record as stored by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: RecordId,

    #[serde(default)]
    pub title: String,

    pub amount: Money,

    /// Date the money moved, as entered by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Server-side creation timestamp, used for history ordering
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Fields the client does not interpret (`type`, `updatedAt`, `__v`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Validation errors for a record about to be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    MissingTitle,
    NonPositiveAmount,
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "Title is required"),
            Self::NonPositiveAmount => write!(f, "Amount must be a positive number"),
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// Body of an add request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecord {
    pub title: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
}

impl NewRecord {
    /// Create a record dated today with empty category and description
    pub fn new(kind: RecordKind, title: impl Into<String>, amount: Money) -> Self {
        Self {
            title: title.into(),
            amount,
            kind,
            date: Utc::now().date_naive(),
            category: String::new(),
            description: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Client-side sanity check before sending
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.title.trim().is_empty() {
            return Err(RecordValidationError::MissingTitle);
        }
        if !self.amount.is_positive() {
            return Err(RecordValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "_id": "64f1c2a9e4b0a1b2c3d4e5f6",
        "title": "Salary",
        "amount": 2500,
        "type": "income",
        "date": "2024-03-01T00:00:00.000Z",
        "category": "salary",
        "description": "March pay",
        "createdAt": "2024-03-02T09:15:00.000Z",
        "updatedAt": "2024-03-02T09:15:00.000Z",
        "__v": 0
    }"#;

    #[test]
    fn test_deserialize_server_record() {
        let record: Record = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(record.id.as_str(), "64f1c2a9e4b0a1b2c3d4e5f6");
        assert_eq!(record.title, "Salary");
        assert_eq!(record.amount.cents(), 250_000);
        assert_eq!(record.category, "salary");
        assert_eq!(
            record.created_at.unwrap().to_rfc3339(),
            "2024-03-02T09:15:00+00:00"
        );
        assert_eq!(record.extra.get("type"), Some(&Value::from("income")));
        assert!(record.extra.contains_key("__v"));
    }

    #[test]
    fn test_minimal_record() {
        let record: Record = serde_json::from_str(r#"{"_id": "a1", "amount": 3.75}"#).unwrap();
        assert_eq!(record.amount.cents(), 375);
        assert!(record.title.is_empty());
        assert!(record.created_at.is_none());
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_malformed_string_amount_fails_decoding() {
        let bad = serde_json::from_str::<Record>(r#"{"_id": "x", "amount": "1.a\u00e9"}"#);
        assert!(bad.is_err());

        let list = serde_json::from_str::<Vec<Record>>(r#"[{"_id": "x", "amount": "1.aé"}]"#);
        assert!(list.is_err());

        let ok: Record = serde_json::from_str(r#"{"_id": "x", "amount": "12.30"}"#).unwrap();
        assert_eq!(ok.amount.cents(), 1230);
    }

    #[test]
    fn test_unknown_fields_survive_reserialization() {
        let record: Record = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["_id"], "64f1c2a9e4b0a1b2c3d4e5f6");
        assert_eq!(json["updatedAt"], "2024-03-02T09:15:00.000Z");
        assert_eq!(json["amount"], 2500);
    }

    #[test]
    fn test_new_record_body() {
        let body = NewRecord::new(RecordKind::Expense, "Groceries", Money::from_cents(4250))
            .with_category("groceries")
            .with_description("weekly shop")
            .with_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["title"], "Groceries");
        assert_eq!(json["amount"], 42.5);
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-03-05");
        assert_eq!(json["category"], "groceries");
    }

    #[test]
    fn test_new_record_validation() {
        let ok = NewRecord::new(RecordKind::Income, "Salary", Money::from_cents(100));
        assert!(ok.validate().is_ok());

        let blank = NewRecord::new(RecordKind::Income, "  ", Money::from_cents(100));
        assert_eq!(blank.validate(), Err(RecordValidationError::MissingTitle));

        let zero = NewRecord::new(RecordKind::Income, "Salary", Money::zero());
        assert_eq!(zero.validate(), Err(RecordValidationError::NonPositiveAmount));
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(RecordKind::Income.add_endpoint(), "add-income");
        assert_eq!(RecordKind::Income.list_endpoint(), "get-incomes");
        assert_eq!(RecordKind::Expense.delete_endpoint(), "delete-expense");
    }
}
