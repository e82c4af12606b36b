//! Month selector: the `YYYY-MM` period a ledger view is scoped to.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CalendarError, GroupingError};
use crate::ledger::{read_record, LedgerRecord};
use crate::locale::{capitalize, month_of, Locale};

/// Serialized as `"YYYY-MM"`; deserializing goes through [`YearMonth::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self::containing)
            .ok_or_else(|| CalendarError::InvalidMonth(format!("{year:04}-{month:02}")))
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self, CalendarError> {
        let s = s.trim();
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map(Self::containing)
            .map_err(|_| CalendarError::InvalidMonth(s.to_string()))
    }

    pub fn containing(day: NaiveDate) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Constructors only admit valid (year, month) pairs.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day.year() == self.year && day.month() == self.month
    }

    /// Selector heading, e.g. "Marzo 2024".
    pub fn label<L: Locale + ?Sized>(&self, locale: &L) -> String {
        let name = locale.month_name(month_of(self.first_day()));
        format!("{} {}", capitalize(name), self.year)
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = CalendarError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<YearMonth> for String {
    fn from(month: YearMonth) -> Self {
        month.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Records whose local calendar day falls in `month`, in input order.
///
/// Every record is validated, including those outside the month.
pub fn records_in_month<'a, R: LedgerRecord>(
    records: &'a [R],
    month: YearMonth,
    zone: &Tz,
) -> Result<Vec<&'a R>, GroupingError> {
    let mut out = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let (at, _) = read_record(i, record, zone)?;
        if month.contains(at.date_naive()) {
            out.push(record);
        }
    }
    Ok(out)
}
