//! Untyped access to snapshot tables.
//!
//! Typed loading rejects a bad row with a serde error and no row index.
//! Reading rows as `serde_json::Value` lets the grouper report exactly which
//! record is malformed.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Rows of `table` from a snapshot file; a missing table yields no rows.
pub fn raw_rows(path: impl AsRef<Path>, table: &str) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    raw_rows_from_str(&s, table).with_context(|| format!("load {}", path.display()))
}

pub fn raw_rows_from_str(json: &str, table: &str) -> Result<Vec<Value>> {
    let root: Value = serde_json::from_str(json).context("parse snapshot json")?;
    match root.get(table) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(rows)) => Ok(rows.clone()),
        Some(other) => bail!("table '{table}' is not an array (found {})", kind(other)),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_rows_keep_bad_amounts() {
        let json = r#"{"transactions": [{"date": "2024-03-15", "amount": "12"}]}"#;
        let rows = raw_rows_from_str(json, "transactions").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["amount"], "12");
    }

    #[test]
    fn test_missing_table_is_empty() {
        assert!(raw_rows_from_str("{}", "income").unwrap().is_empty());
    }

    #[test]
    fn test_non_array_table_fails() {
        let err = raw_rows_from_str(r#"{"income": {"a": 1}}"#, "income").unwrap_err();
        assert!(err.to_string().contains("not an array (found object)"));
    }
}
