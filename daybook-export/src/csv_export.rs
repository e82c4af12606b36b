//! CSV export of a ledger view, flat or with day headings.

use anyhow::Result;
use daybook_core::{DateGroup, Locale, Transaction};
use daybook_ingest::Snapshot;
use serde::Serialize;
use std::io::Write;

use crate::view::LedgerView;

const FLAT_HEADER: [&str; 5] = ["date", "description", "amount", "category", "payment_method"];
const GROUPED_HEADER: [&str; 8] = [
    "day",
    "label",
    "day_total",
    "date",
    "description",
    "amount",
    "category",
    "payment_method",
];

#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    date: &'a str,
    description: &'a str,
    amount: String,
    category: &'a str,
    payment_method: &'a str,
}

#[derive(Debug, Serialize)]
struct GroupedRow<'a> {
    day: &'a str,
    label: &'a str,
    day_total: String,
    date: &'a str,
    description: &'a str,
    amount: String,
    category: &'a str,
    payment_method: &'a str,
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

fn ledger_row<'a>(snapshot: &'a Snapshot, t: &'a Transaction) -> LedgerRow<'a> {
    LedgerRow {
        date: &t.date,
        description: &t.description,
        amount: money(t.amount),
        category: snapshot.category_name(t),
        payment_method: snapshot.payment_method_name(t),
    }
}

/// Write one row per transaction, newest first. Returns the row count.
pub fn export_csv<W: Write, L: Locale>(writer: W, view: &LedgerView<'_, L>) -> Result<usize> {
    let groups = view.groups()?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(FLAT_HEADER)?;

    let mut rows = 0;
    for t in groups.iter().flat_map(|g| g.records.iter().copied()) {
        wtr.serialize(ledger_row(view.snapshot, t))?;
        rows += 1;
    }
    wtr.flush()?;
    Ok(rows)
}

/// Like [`export_csv`], with each row carrying its day key, label and day total.
pub fn export_grouped_csv<W: Write, L: Locale>(
    writer: W,
    view: &LedgerView<'_, L>,
) -> Result<usize> {
    let groups = view.groups()?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(GROUPED_HEADER)?;

    let mut rows = 0;
    for group in &groups {
        rows += write_group(&mut wtr, view.snapshot, group)?;
    }
    wtr.flush()?;
    Ok(rows)
}

fn write_group<W: Write>(
    wtr: &mut csv::Writer<W>,
    snapshot: &Snapshot,
    group: &DateGroup<'_, Transaction>,
) -> Result<usize> {
    for t in &group.records {
        let row = ledger_row(snapshot, t);
        wtr.serialize(GroupedRow {
            day: group.date_key.as_str(),
            label: &group.label,
            day_total: money(group.total),
            date: row.date,
            description: row.description,
            amount: row.amount,
            category: row.category,
            payment_method: row.payment_method,
        })?;
    }
    Ok(group.records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_core::{parse_instant, DateGrouper, Spanish, YearMonth};
    use daybook_ingest::parse_snapshot;

    const SAMPLE: &str = r#"{
        "transactions": [
            {"id": "t1", "date": "2024-03-15T08:00", "amount": -50, "description": "Tacos",
             "category_id": "food", "payment_method_id": "cash"},
            {"id": "t2", "date": "2024-03-15T21:00", "amount": -20.5, "description": "Metro"},
            {"id": "t3", "date": "2024-02-28", "amount": -100, "description": "Luz, agua",
             "category_id": "home"}
        ],
        "categories": [{"id": "food", "name": "Comida"}, {"id": "home", "name": "Casa"}],
        "payment_methods": [{"id": "cash", "name": "Efectivo"}]
    }"#;

    fn render(grouped: bool, month: Option<YearMonth>) -> (usize, String) {
        let snapshot = parse_snapshot(SAMPLE).unwrap();
        let zone = chrono_tz::America::Mexico_City;
        let grouper = DateGrouper::new(Spanish, zone);
        let now = parse_instant("2024-03-15T12:00", &zone).unwrap();
        let view = LedgerView::new(&snapshot, &grouper, now).with_month(month);

        let mut out = Vec::new();
        let rows = if grouped {
            export_grouped_csv(&mut out, &view).unwrap()
        } else {
            export_csv(&mut out, &view).unwrap()
        };
        (rows, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_flat_csv() {
        let (rows, csv) = render(false, None);
        assert_eq!(rows, 3);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,description,amount,category,payment_method");
        assert_eq!(lines[1], "2024-03-15T21:00,Metro,-20.50,,");
        assert_eq!(lines[2], "2024-03-15T08:00,Tacos,-50.00,Comida,Efectivo");
        assert_eq!(lines[3], "2024-02-28,\"Luz, agua\",-100.00,Casa,");
    }

    #[test]
    fn test_grouped_csv_carries_day_columns() {
        let (rows, csv) = render(true, None);
        assert_eq!(rows, 3);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "day,label,day_total,date,description,amount,category,payment_method"
        );
        assert_eq!(lines[1], "2024-03-15,Hoy,-70.50,2024-03-15T21:00,Metro,-20.50,,");
        assert_eq!(
            lines[3],
            "2024-02-28,Miércoles 28 de febrero,-100.00,2024-02-28,\"Luz, agua\",-100.00,Casa,"
        );
    }

    #[test]
    fn test_month_filter_keeps_header() {
        let (rows, csv) = render(false, Some(YearMonth::new(2024, 1).unwrap()));
        assert_eq!(rows, 0);
        assert_eq!(csv, "date,description,amount,category,payment_method\n");

        let (rows, _) = render(true, Some(YearMonth::new(2024, 2).unwrap()));
        assert_eq!(rows, 1);
    }
}
