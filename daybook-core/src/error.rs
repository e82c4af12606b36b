//! Error types for grouping and calendar selection.

use thiserror::Error;

/// Failure while turning ledger records into calendar-day groups.
///
/// Grouping is all-or-nothing: any of these aborts the whole batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroupingError {
    /// A `date` cannot be read as an ISO-8601 date or date-time.
    /// `index` is set when the value came from a record in a batch.
    #[error("{}cannot parse date '{}': {}", record_prefix(.index), .value, .reason)]
    DateParse {
        index: Option<usize>,
        value: String,
        reason: String,
    },

    /// A record is missing a required field or carries a non-numeric amount.
    #[error("record #{index} is malformed: `{field}` {reason}")]
    MalformedRecord {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

impl GroupingError {
    /// Attach the batch position of the record that failed to parse.
    pub(crate) fn at_record(self, index: usize) -> Self {
        match self {
            GroupingError::DateParse { value, reason, .. } => GroupingError::DateParse {
                index: Some(index),
                value,
                reason,
            },
            other => other,
        }
    }
}

fn record_prefix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("record #{i}: "),
        None => String::new(),
    }
}

/// Failure while resolving calendar settings (zones, locales, months).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("unknown time zone: {0}")]
    UnknownZone(String),

    #[error("invalid month '{0}' (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("unknown locale '{0}' (expected one of: es, en)")]
    UnknownLocale(String),
}
