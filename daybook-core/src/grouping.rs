//! Calendar-day grouping of ledger records with locale-aware labels.
//!
//! Records are bucketed by the calendar day they fall on in the configured
//! zone. Each bucket carries a display label relative to a reference
//! instant ("Hoy", "Ayer", a weekday name this week, or a long date), its
//! `YYYY-MM-DD` key, the member records and their summed amount.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Weekday};
use chrono_tz::Tz;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::GroupingError;
use crate::ledger::{read_record, LedgerRecord};
use crate::locale::{capitalize, Locale};
use crate::time::{calendar_day, DateKey};

/// One calendar day of records, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup<'a, R> {
    pub label: String,
    pub date_key: DateKey,
    pub date: NaiveDate,
    /// Newest first; equal timestamps keep input order
    pub records: Vec<&'a R>,
    pub total: f64,
}

/// Groups records by local calendar day using an injected locale.
#[derive(Debug, Clone)]
pub struct DateGrouper<L> {
    locale: L,
    zone: Tz,
}

impl<L: Locale> DateGrouper<L> {
    pub fn new(locale: L, zone: Tz) -> Self {
        Self { locale, zone }
    }

    /// Display label for `day` relative to `reference_now`.
    pub fn label_for<Z: TimeZone>(&self, day: NaiveDate, reference_now: &DateTime<Z>) -> String {
        let today = reference_now.with_timezone(&self.zone).date_naive();
        label_for_day(&self.locale, day, today)
    }

    /// Grouping key of a timestamp string.
    pub fn key_for(&self, value: &str) -> Result<DateKey, GroupingError> {
        Ok(DateKey::from(calendar_day(value, &self.zone)?))
    }

    /// Bucket `records` by calendar day, newest day first.
    ///
    /// Fails on the first unparseable date or malformed amount; no partial
    /// result is returned. The input slice is never reordered.
    pub fn group_by_date<'a, R, Z>(
        &self,
        records: &'a [R],
        reference_now: &DateTime<Z>,
    ) -> Result<Vec<DateGroup<'a, R>>, GroupingError>
    where
        R: LedgerRecord,
        Z: TimeZone,
    {
        let today = reference_now.with_timezone(&self.zone).date_naive();

        let mut entries = records
            .iter()
            .enumerate()
            .map(|(i, r)| read_record(i, r, &self.zone).map(|(at, amount)| (at, amount, r)))
            .collect::<Result<Vec<_>, _>>()?;

        // Stable: records with identical instants keep their input order.
        entries.sort_by(|a, b| b.0.cmp(&a.0));

        let mut groups: BTreeMap<NaiveDate, DateGroup<'a, R>> = BTreeMap::new();
        for (at, amount, record) in entries {
            let day = at.date_naive();
            let group = groups.entry(day).or_insert_with(|| DateGroup {
                label: label_for_day(&self.locale, day, today),
                date_key: DateKey::from(day),
                date: day,
                records: Vec::new(),
                total: 0.0,
            });
            group.records.push(record);
            group.total += amount;
        }

        debug!(
            "grouped {} records into {} days (today = {})",
            records.len(),
            groups.len(),
            today
        );

        Ok(groups.into_values().rev().collect())
    }
}

/// Label `day` relative to the calendar day `today`.
pub fn label_for_day<L: Locale + ?Sized>(locale: &L, day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        return locale.today().to_string();
    }
    if today.pred_opt() == Some(day) {
        return locale.yesterday().to_string();
    }

    let week_start = today - Duration::days(days_since(today.weekday(), locale.week_start()));
    let week_end = week_start + Duration::days(7);
    if day >= week_start && day < week_end {
        return capitalize(locale.weekday_name(day.weekday()));
    }

    capitalize(&locale.long_date(day))
}

/// Days from `start` forward to `weekday`, in `0..7`.
fn days_since(weekday: Weekday, start: Weekday) -> i64 {
    let w = weekday.num_days_from_monday() as i64;
    let s = start.num_days_from_monday() as i64;
    (w - s).rem_euclid(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Transaction;
    use crate::locale::{English, Spanish};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn grouper() -> DateGrouper<Spanish> {
        DateGrouper::new(Spanish, chrono_tz::America::Mexico_City)
    }

    fn now(s: &str) -> DateTime<Tz> {
        crate::time::parse_instant(s, &chrono_tz::America::Mexico_City).unwrap()
    }

    #[test]
    fn test_label_today_and_yesterday() {
        let today = day(2024, 3, 15);
        assert_eq!(label_for_day(&Spanish, today, today), "Hoy");
        assert_eq!(label_for_day(&Spanish, day(2024, 3, 14), today), "Ayer");
        assert_eq!(label_for_day(&English, day(2024, 3, 14), today), "Yesterday");
    }

    #[test]
    fn test_label_same_week_is_weekday() {
        // 2024-03-15 is a Friday; its Monday-start week is 11..=17.
        let today = day(2024, 3, 15);
        assert_eq!(label_for_day(&Spanish, day(2024, 3, 11), today), "Lunes");
        assert_eq!(label_for_day(&Spanish, day(2024, 3, 13), today), "Miércoles");
        assert_eq!(label_for_day(&English, day(2024, 3, 12), today), "Tuesday");
        // Later in the same week still counts as this week.
        assert_eq!(label_for_day(&Spanish, day(2024, 3, 17), today), "Domingo");
    }

    #[test]
    fn test_label_outside_week_is_long_date() {
        let today = day(2024, 3, 15);
        assert_eq!(label_for_day(&Spanish, day(2024, 3, 10), today), "Domingo 10 de marzo");
        assert_eq!(label_for_day(&English, day(2024, 3, 5), today), "Tuesday 5 of March");
        assert_eq!(label_for_day(&Spanish, day(2024, 3, 18), today), "Lunes 18 de marzo");
    }

    #[test]
    fn test_yesterday_across_week_boundary() {
        // Monday's yesterday is Sunday of the previous week.
        let today = day(2024, 3, 11);
        assert_eq!(label_for_day(&Spanish, day(2024, 3, 10), today), "Ayer");
        assert_eq!(label_for_day(&Spanish, day(2024, 3, 9), today), "Sábado 9 de marzo");
    }

    #[test]
    fn test_label_for_uses_local_day_of_reference() {
        let g = grouper();
        // 2024-03-15T03:00Z is still the 14th in Mexico City (UTC-6).
        let reference = chrono::Utc.with_ymd_and_hms(2024, 3, 15, 3, 0, 0).unwrap();
        assert_eq!(g.label_for(day(2024, 3, 14), &reference), "Hoy");
    }

    #[test]
    fn test_key_for_ignores_time_of_day() {
        let g = grouper();
        assert_eq!(g.key_for("2024-03-15T08:00").unwrap(), g.key_for("2024-03-15T22:00").unwrap());
        assert_eq!(g.key_for("2024-03-15").unwrap().as_str(), "2024-03-15");
    }

    #[test]
    fn test_group_empty() {
        let records: Vec<Transaction> = Vec::new();
        let groups = grouper().group_by_date(&records, &now("2024-03-15T10:00:00")).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_group_same_day() {
        let records = vec![
            Transaction::new("a", "2024-03-15T08:00", 50.0),
            Transaction::new("b", "2024-03-15T22:00", 20.0),
        ];
        let groups = grouper().group_by_date(&records, &now("2024-03-15T10:00:00")).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Hoy");
        assert_eq!(groups[0].total, 70.0);
        // Newest first inside the day.
        assert_eq!(groups[0].records[0].id, "b");
        assert_eq!(groups[0].records[1].id, "a");
    }

    #[test]
    fn test_group_yesterday() {
        let records = vec![Transaction::new("a", "2024-03-14", 30.0)];
        let groups = grouper().group_by_date(&records, &now("2024-03-15")).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Ayer");
        assert_eq!(groups[0].total, 30.0);
    }

    #[test]
    fn test_group_orders_days_descending() {
        let records = vec![
            Transaction::new("old", "2024-03-10", 100.0),
            Transaction::new("new", "2024-03-12", 200.0),
        ];
        let groups = grouper().group_by_date(&records, &now("2024-03-15")).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date_key.as_str(), "2024-03-12");
        assert_eq!(groups[0].label, "Martes");
        assert_eq!(groups[0].total, 200.0);
        assert_eq!(groups[1].date_key.as_str(), "2024-03-10");
        assert_eq!(groups[1].label, "Domingo 10 de marzo");
        assert_eq!(groups[1].total, 100.0);
    }

    #[test]
    fn test_group_fails_on_bad_date() {
        let records = vec![
            Transaction::new("ok", "2024-03-15", 1.0),
            Transaction::new("bad", "not-a-date", 2.0),
        ];
        let err = grouper().group_by_date(&records, &now("2024-03-15")).unwrap_err();
        assert!(matches!(err, GroupingError::DateParse { ref value, .. } if value == "not-a-date"));
    }

    #[test]
    fn test_group_keeps_duplicates_and_zero() {
        let records = vec![
            Transaction::new("a", "2024-03-15T09:00", 10.0),
            Transaction::new("a", "2024-03-15T09:00", 10.0),
            Transaction::new("z", "2024-03-15T09:00", 0.0),
        ];
        let groups = grouper().group_by_date(&records, &now("2024-03-15")).unwrap();
        assert_eq!(groups[0].records.len(), 3);
        assert_eq!(groups[0].total, 20.0);
        // Identical instants keep input order.
        assert!(std::ptr::eq(groups[0].records[0], &records[0]));
        assert!(std::ptr::eq(groups[0].records[1], &records[1]));
        assert!(std::ptr::eq(groups[0].records[2], &records[2]));
    }

    #[test]
    fn test_group_does_not_reorder_input() {
        let records = vec![
            Transaction::new("a", "2024-03-01", 1.0),
            Transaction::new("b", "2024-03-09", 2.0),
        ];
        let before = records.clone();
        grouper().group_by_date(&records, &now("2024-03-15")).unwrap();
        assert_eq!(records, before);
    }

    #[test]
    fn test_days_since() {
        assert_eq!(days_since(Weekday::Mon, Weekday::Mon), 0);
        assert_eq!(days_since(Weekday::Sun, Weekday::Mon), 6);
        assert_eq!(days_since(Weekday::Mon, Weekday::Sun), 1);
    }
}
