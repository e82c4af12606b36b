//! Month totals: income, expenses, balance and per-category spend.

use chrono_tz::Tz;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::GroupingError;
use crate::ledger::{read_record, Category, Income, Transaction};
use crate::month::YearMonth;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// `None` collects uncategorized transactions and dangling ids
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: YearMonth,
    /// Income entries plus positive transactions
    pub income_total: f64,
    /// Sum of expense magnitudes (always >= 0)
    pub expense_total: f64,
    pub balance: f64,
    /// Largest magnitude first
    pub by_category: Vec<CategoryTotal>,
}

pub fn summarize_month(
    transactions: &[Transaction],
    income: &[Income],
    categories: &[Category],
    month: YearMonth,
    zone: &Tz,
) -> Result<MonthSummary, GroupingError> {
    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut income_total = 0.0;
    let mut expense_total = 0.0;
    let mut buckets: HashMap<Option<&str>, CategoryTotal> = HashMap::new();

    for (i, t) in transactions.iter().enumerate() {
        let (at, amount) = read_record(i, t, zone)?;
        if !month.contains(at.date_naive()) {
            continue;
        }
        if t.is_expense() {
            expense_total -= amount;
        } else {
            income_total += amount;
        }

        let known = t
            .category_id
            .as_deref()
            .and_then(|id| names.get_key_value(id));
        let bucket = buckets
            .entry(known.map(|(id, _)| *id))
            .or_insert_with(|| CategoryTotal {
                category_id: known.map(|(id, _)| id.to_string()),
                name: known.map(|(_, name)| name.to_string()),
                total: 0.0,
                count: 0,
            });
        bucket.total += amount;
        bucket.count += 1;
    }

    for (i, entry) in income.iter().enumerate() {
        let (at, amount) = read_record(i, entry, zone)?;
        if month.contains(at.date_naive()) {
            income_total += amount;
        }
    }

    let mut by_category: Vec<CategoryTotal> = buckets.into_values().collect();
    by_category.sort_by(|a, b| {
        b.total
            .abs()
            .total_cmp(&a.total.abs())
            .then_with(|| a.name.cmp(&b.name))
    });

    debug!(
        "summary {month}: income={income_total:.2} expenses={expense_total:.2} categories={}",
        by_category.len()
    );

    Ok(MonthSummary {
        month,
        income_total,
        expense_total,
        balance: income_total - expense_total,
        by_category,
    })
}
