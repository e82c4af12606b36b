//! daybook-ingest: loading backend snapshots (typed tables and raw rows).

pub mod raw;
pub mod snapshot;

pub use raw::{raw_rows, raw_rows_from_str};
pub use snapshot::{load_snapshot, parse_snapshot, Snapshot};
