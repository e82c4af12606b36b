//! daybook-export: CSV and JSON exports of a ledger, flat or grouped by day

pub mod csv_export;
pub mod json_export;
pub mod view;

use anyhow::{Context, Result};
use daybook_core::Locale;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use csv_export::{export_csv, export_grouped_csv};
pub use json_export::export_json;
pub use view::LedgerView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    #[default]
    Csv,
    GroupedCsv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv | ExportFormat::GroupedCsv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "grouped-csv" => Ok(ExportFormat::GroupedCsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!(
                "unknown export format '{other}' (expected csv, grouped-csv or json)"
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Csv => "csv",
            ExportFormat::GroupedCsv => "grouped-csv",
            ExportFormat::Json => "json",
        })
    }
}

/// Export `view` to `path` in `format`. Returns the number of transactions written.
///
/// The export is rendered in memory first; `path` is left untouched on failure.
pub fn export_to_file<L: Locale>(
    path: impl AsRef<Path>,
    format: ExportFormat,
    view: &LedgerView<'_, L>,
) -> Result<usize> {
    let path = path.as_ref();
    let mut buf = Vec::new();

    let rows = match format {
        ExportFormat::Csv => export_csv(&mut buf, view),
        ExportFormat::GroupedCsv => export_grouped_csv(&mut buf, view),
        ExportFormat::Json => export_json(&mut buf, view),
    }
    .with_context(|| format!("export {} to {}", format, path.display()))?;

    fs::write(path, &buf).with_context(|| format!("write {}", path.display()))?;

    info!("Exported {} transactions to {}", rows, path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_trip() {
        for f in [ExportFormat::Csv, ExportFormat::GroupedCsv, ExportFormat::Json] {
            assert_eq!(f.to_string().parse::<ExportFormat>().unwrap(), f);
        }
        assert!("xlsx".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::GroupedCsv.extension(), "csv");
    }
}
