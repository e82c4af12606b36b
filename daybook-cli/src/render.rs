//! Plain-text rendering of day groups and month summaries.

use daybook_core::{DateGroup, Locale, LocaleId, MonthSummary, Transaction};
use daybook_ingest::Snapshot;
use serde_json::Value;
use std::fmt::Write;

/// One heading per day followed by an indented line per record.
pub fn render_groups<R>(groups: &[DateGroup<'_, R>], describe: impl Fn(&R) -> String) -> String {
    let mut out = String::new();
    for g in groups {
        let _ = writeln!(out, "{} ({})  total {:.2}", g.label, g.date_key, g.total);
        for r in &g.records {
            let _ = writeln!(out, "  {}", describe(*r));
        }
    }
    out
}

pub fn describe_transaction(snapshot: &Snapshot, t: &Transaction) -> String {
    let mut line = format!("{:>10.2}  {}", t.amount, t.description);
    let category = snapshot.category_name(t);
    if !category.is_empty() {
        let _ = write!(line, "  [{category}]");
    }
    let method = snapshot.payment_method_name(t);
    if !method.is_empty() {
        let _ = write!(line, "  ({method})");
    }
    line
}

pub fn describe_row(row: &Value) -> String {
    let amount = row.get("amount").and_then(Value::as_f64).unwrap_or_default();
    let description = row
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default();
    format!("{amount:>10.2}  {description}")
}

/// Heading for transactions without a known category.
pub fn uncategorized_label(locale: LocaleId) -> &'static str {
    match locale {
        LocaleId::Es => "Sin categoría",
        LocaleId::En => "Uncategorized",
    }
}

pub fn render_summary<L: Locale>(summary: &MonthSummary, locale: &L, uncategorized: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", summary.month.label(locale));
    let _ = writeln!(out, "Income:   {:>12.2}", summary.income_total);
    let _ = writeln!(out, "Expenses: {:>12.2}", summary.expense_total);
    let _ = writeln!(out, "Balance:  {:>12.2}", summary.balance);
    if !summary.by_category.is_empty() {
        let _ = writeln!(out, "\n## By category\n");
        for c in &summary.by_category {
            let _ = writeln!(
                out,
                "- {}: {:.2} ({} transactions)",
                c.name.as_deref().unwrap_or(uncategorized),
                c.total,
                c.count
            );
        }
    }
    out
}
