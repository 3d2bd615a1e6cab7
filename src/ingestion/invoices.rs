//! Invoice batch loader.
//!
//! Supported inputs:
//! - A JSON array of invoice objects: `[{"id":1,...}, {"id":2,...}]`
//! - Newline-delimited JSON (NDJSON): `{"id":1,...}\n{"id":2,...}\n`
//! - A single top-level object, read as a one-record batch (this is also
//!   what a one-line NDJSON stream parses as)
//!
//! Records are kept as raw [`serde_json::Value`] objects in input order; no
//! field is required or type-checked here. Downstream coercion decides what
//! is usable.

use std::fs;
use std::path::Path;

use crate::error::{ExtractError, ExtractResult};

/// Load an invoice batch from a file.
pub fn load_invoices_from_path(path: impl AsRef<Path>) -> ExtractResult<Vec<serde_json::Value>> {
    let text = fs::read_to_string(path)?;
    load_invoices_from_str(&text)
}

/// Load an invoice batch from an in-memory string.
pub fn load_invoices_from_str(input: &str) -> ExtractResult<Vec<serde_json::Value>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::InvalidBatch {
            message: "invoice input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(records) => require_objects(records),
            serde_json::Value::Object(_) => Ok(vec![v]),
            _ => Err(ExtractError::InvalidBatch {
                message: "invoice batch must be an object, an array of objects, or NDJSON"
                    .to_string(),
            }),
        }
    } else {
        // Fall back to NDJSON.
        let mut records = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                ExtractError::InvalidBatch {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            records.push(v);
        }
        require_objects(records)
    }
}

fn require_objects(records: Vec<serde_json::Value>) -> ExtractResult<Vec<serde_json::Value>> {
    for (idx0, v) in records.iter().enumerate() {
        if !v.is_object() {
            return Err(ExtractError::InvalidBatch {
                message: format!("record {} is not a json object", idx0 + 1),
            });
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::load_invoices_from_str;

    #[test]
    fn loads_json_array_in_input_order() {
        let input = r#"[{"id": 2, "items": []}, {"id": 1, "items": []}]"#;
        let records = load_invoices_from_str(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], 2);
        assert_eq!(records[1]["id"], 1);
    }

    #[test]
    fn loads_ndjson() {
        let input = "\n{\"id\": 1}\n\n{\"id\": 2}\n";
        let records = load_invoices_from_str(input).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn single_object_becomes_one_record_batch() {
        let records = load_invoices_from_str(r#"{"id": 5, "items": []}"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], 5);
    }

    #[test]
    fn rejects_empty_input() {
        let err = load_invoices_from_str("  \n ").unwrap_err();
        assert!(err.to_string().contains("invoice input is empty"));
    }

    #[test]
    fn rejects_non_object_records() {
        let err = load_invoices_from_str(r#"[{"id": 1}, 42]"#).unwrap_err();
        assert!(err.to_string().contains("record 2 is not a json object"));
    }

    #[test]
    fn rejects_scalar_top_level() {
        let err = load_invoices_from_str("42").unwrap_err();
        assert!(err.to_string().contains("must be an object"));
    }
}
