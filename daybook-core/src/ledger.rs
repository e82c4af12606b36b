//! Ledger entities as they come out of the backend tables.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GroupingError;
use crate::time::parse_instant;

/// Anything with a `date` string and a signed `amount`.
///
/// Accessors return `None` when the backend row lacks the field or carries
/// a value of the wrong type.
pub trait LedgerRecord {
    fn date(&self) -> Option<&str>;
    fn amount(&self) -> Option<f64>;
}

impl<T: LedgerRecord + ?Sized> LedgerRecord for &T {
    fn date(&self) -> Option<&str> {
        (**self).date()
    }

    fn amount(&self) -> Option<f64> {
        (**self).amount()
    }
}

/// Untyped backend rows: `{"date": "...", "amount": 12.5, ...}`.
impl LedgerRecord for Value {
    fn date(&self) -> Option<&str> {
        self.get("date").and_then(Value::as_str)
    }

    fn amount(&self) -> Option<f64> {
        self.get("amount").and_then(Value::as_f64)
    }
}

/// Validate one record and read its instant and amount.
///
/// `index` is the record's position in the caller's batch, reported on error.
pub fn read_record<R: LedgerRecord + ?Sized>(
    index: usize,
    record: &R,
    zone: &Tz,
) -> Result<(DateTime<Tz>, f64), GroupingError> {
    let date = record.date().ok_or_else(|| GroupingError::MalformedRecord {
        index,
        field: "date",
        reason: "is missing or not a string".to_string(),
    })?;
    let instant = parse_instant(date, zone).map_err(|e| e.at_record(index))?;
    let amount = record
        .amount()
        .filter(|a| a.is_finite())
        .ok_or_else(|| GroupingError::MalformedRecord {
            index,
            field: "amount",
            reason: "is missing or not a finite number".to_string(),
        })?;
    Ok((instant, amount))
}

/// A spending or refund entry. Negative = expense, positive = money back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    /// ISO-8601 date or date-time as stored by the backend
    pub date: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub payment_method_id: Option<String>,
}

impl Transaction {
    pub fn new(id: impl Into<String>, date: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            amount,
            description: String::new(),
            category_id: None,
            payment_method_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_payment_method(mut self, payment_method_id: impl Into<String>) -> Self {
        self.payment_method_id = Some(payment_method_id.into());
        self
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

impl LedgerRecord for Transaction {
    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn amount(&self) -> Option<f64> {
        Some(self.amount)
    }
}

/// A salary, transfer-in, or other income entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Income {
    pub id: String,
    pub date: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

impl LedgerRecord for Income {
    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn amount(&self) -> Option<f64> {
        Some(self.amount)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    #[default]
    Expense,
    Income,
}

/// User-defined spending category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: CategoryKind,
    /// Hex color used by the UI, e.g. "#f97316"
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Cash,
    Debit,
    Credit,
    Transfer,
    #[default]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: PaymentKind,
}
