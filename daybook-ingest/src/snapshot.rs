//! Backend snapshot: a JSON dump of the ledger tables.
//!
//! Expected shape (every table optional):
//!   { "transactions": [...], "categories": [...],
//!     "income": [...], "payment_methods": [...] }

use anyhow::{Context, Result};
use daybook_core::{Category, Income, PaymentMethod, Transaction};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub income: Vec<Income>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
}

impl Snapshot {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn payment_method(&self, id: &str) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|p| p.id == id)
    }

    /// Category name for a transaction, empty when unset or dangling.
    pub fn category_name(&self, t: &Transaction) -> &str {
        t.category_id
            .as_deref()
            .and_then(|id| self.category(id))
            .map(|c| c.name.as_str())
            .unwrap_or("")
    }

    /// Payment-method name for a transaction, empty when unset or dangling.
    pub fn payment_method_name(&self, t: &Transaction) -> &str {
        t.payment_method_id
            .as_deref()
            .and_then(|id| self.payment_method(id))
            .map(|p| p.name.as_str())
            .unwrap_or("")
    }

    /// Report transactions pointing at categories or payment methods that
    /// are not in the snapshot. Dangling ids are not fatal.
    pub fn validate(&self) -> Vec<String> {
        let categories: HashSet<&str> = self.categories.iter().map(|c| c.id.as_str()).collect();
        let methods: HashSet<&str> = self
            .payment_methods
            .iter()
            .map(|p| p.id.as_str())
            .collect();

        let mut warnings = Vec::new();
        for t in &self.transactions {
            if let Some(id) = t.category_id.as_deref() {
                if !categories.contains(id) {
                    warnings.push(format!("transaction {} references unknown category {id}", t.id));
                }
            }
            if let Some(id) = t.payment_method_id.as_deref() {
                if !methods.contains(id) {
                    warnings.push(format!(
                        "transaction {} references unknown payment method {id}",
                        t.id
                    ));
                }
            }
        }
        warnings
    }
}

/// Parse a snapshot from JSON text.
pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_str(json).context("parse snapshot json")?;
    for w in snapshot.validate() {
        warn!("{w}");
    }
    Ok(snapshot)
}

/// Load a snapshot file.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let snapshot = parse_snapshot(&s).with_context(|| format!("load {}", path.display()))?;
    info!(
        "Loaded {} transactions, {} income entries, {} categories, {} payment methods from {}",
        snapshot.transactions.len(),
        snapshot.income.len(),
        snapshot.categories.len(),
        snapshot.payment_methods.len(),
        path.display()
    );
    Ok(snapshot)
}
