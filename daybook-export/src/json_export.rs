//! JSON export: day groups with category and payment-method names resolved.

use anyhow::Result;
use daybook_core::Locale;
use serde::Serialize;
use std::io::Write;

use crate::view::LedgerView;

#[derive(Debug, Serialize)]
struct JsonDay<'a> {
    label: &'a str,
    date_key: &'a str,
    total: f64,
    transactions: Vec<JsonEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    id: &'a str,
    date: &'a str,
    description: &'a str,
    amount: f64,
    category: Option<&'a str>,
    payment_method: Option<&'a str>,
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Write pretty-printed day groups. Returns the transaction count.
pub fn export_json<W: Write, L: Locale>(writer: W, view: &LedgerView<'_, L>) -> Result<usize> {
    let groups = view.groups()?;
    let snapshot = view.snapshot;

    let days: Vec<JsonDay<'_>> = groups
        .iter()
        .map(|g| JsonDay {
            label: &g.label,
            date_key: g.date_key.as_str(),
            total: g.total,
            transactions: g
                .records
                .iter()
                .map(|t| JsonEntry {
                    id: &t.id,
                    date: &t.date,
                    description: &t.description,
                    amount: t.amount,
                    category: non_empty(snapshot.category_name(t)),
                    payment_method: non_empty(snapshot.payment_method_name(t)),
                })
                .collect(),
        })
        .collect();

    serde_json::to_writer_pretty(writer, &days)?;
    Ok(days.iter().map(|d| d.transactions.len()).sum())
}
