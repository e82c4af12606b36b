//! Time utilities: reading backend timestamps as calendar days in a local zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CalendarError, GroupingError};

/// Wall-clock forms without an offset; interpreted in the local zone.
const LOCAL_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset forms RFC 3339 rejects: Postgres short offsets
/// (`2024-03-15 08:00:00+00`) and ISO-8601 without seconds (`2024-03-15T08:00+00:00`).
const OFFSET_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Canonical `YYYY-MM-DD` identity of a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(day: NaiveDate) -> Self {
        DateKey(day.format("%Y-%m-%d").to_string())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse an IANA zone name like "America/Mexico_City".
pub fn parse_zone(tz: &str) -> Result<Tz, CalendarError> {
    tz.parse()
        .map_err(|_| CalendarError::UnknownZone(tz.to_string()))
}

/// Parse a backend timestamp into an instant in `zone`.
///
/// Accepts RFC 3339 (converted into `zone`), offset-less date-times (wall
/// time in `zone`) and bare `YYYY-MM-DD` dates (local midnight).
pub fn parse_instant(value: &str, zone: &Tz) -> Result<DateTime<Tz>, GroupingError> {
    let s = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(zone));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.with_timezone(zone));
        }
    }
    for fmt in LOCAL_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(value, ndt, zone);
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return localize(value, day.and_time(NaiveTime::MIN), zone);
    }

    Err(GroupingError::DateParse {
        index: None,
        value: value.to_string(),
        reason: "expected an ISO-8601 date or date-time".to_string(),
    })
}

/// The calendar day containing `value` in `zone`.
pub fn calendar_day(value: &str, zone: &Tz) -> Result<NaiveDate, GroupingError> {
    Ok(parse_instant(value, zone)?.date_naive())
}

fn localize(value: &str, ndt: NaiveDateTime, zone: &Tz) -> Result<DateTime<Tz>, GroupingError> {
    // Ambiguous wall times (DST fall-back) resolve to the earlier instant.
    zone.from_local_datetime(&ndt)
        .earliest()
        .ok_or_else(|| GroupingError::DateParse {
            index: None,
            value: value.to_string(),
            reason: format!("local time does not exist in {}", zone.name()),
        })
}
