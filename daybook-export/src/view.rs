//! The slice of a snapshot being exported: grouping rules plus an optional month.

use chrono::DateTime;
use chrono_tz::Tz;
use daybook_core::{DateGroup, DateGrouper, GroupingError, Locale, Transaction, YearMonth};
use daybook_ingest::Snapshot;

pub struct LedgerView<'a, L> {
    pub snapshot: &'a Snapshot,
    pub grouper: &'a DateGrouper<L>,
    pub month: Option<YearMonth>,
    pub reference_now: DateTime<Tz>,
}

impl<'a, L: Locale> LedgerView<'a, L> {
    pub fn new(
        snapshot: &'a Snapshot,
        grouper: &'a DateGrouper<L>,
        reference_now: DateTime<Tz>,
    ) -> Self {
        Self {
            snapshot,
            grouper,
            month: None,
            reference_now,
        }
    }

    pub fn with_month(mut self, month: Option<YearMonth>) -> Self {
        self.month = month;
        self
    }

    /// Day groups of the snapshot's transactions, limited to the month if set.
    ///
    /// The whole ledger is validated even when a month is selected.
    pub fn groups(&self) -> Result<Vec<DateGroup<'a, Transaction>>, GroupingError> {
        let snapshot: &'a Snapshot = self.snapshot;
        let mut groups = self
            .grouper
            .group_by_date(&snapshot.transactions, &self.reference_now)?;
        if let Some(month) = self.month {
            groups.retain(|g| month.contains(g.date));
        }
        Ok(groups)
    }
}
