//! daybook-core: ledger records, calendar-day grouping, month views and summaries

pub mod error;
pub mod grouping;
pub mod ledger;
pub mod locale;
pub mod month;
pub mod summary;
pub mod time;

pub use error::{CalendarError, GroupingError};
pub use grouping::{label_for_day, DateGroup, DateGrouper};
pub use ledger::{
    read_record, Category, CategoryKind, Income, LedgerRecord, PaymentKind, PaymentMethod,
    Transaction,
};
pub use locale::{capitalize, English, Locale, LocaleId, Spanish};
pub use month::{records_in_month, YearMonth};
pub use summary::{summarize_month, CategoryTotal, MonthSummary};
pub use time::{calendar_day, parse_instant, parse_zone, DateKey};
