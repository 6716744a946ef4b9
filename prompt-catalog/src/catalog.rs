//! Reading and writing catalog files
//!
//! A catalog is a JSON array written pretty-printed with two-space indentation
//! and literal non-ASCII characters. Records loaded for validation or repair
//! are kept as raw [`serde_json::Value`]s, since they may not match the record
//! schema yet.

use crate::error::{CatalogError, Result};
use crate::record::PromptRecord;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load a catalog as a list of raw records
///
/// An empty array is a valid catalog. A missing file, malformed JSON or a
/// root element that is not an array is fatal.
pub fn load_catalog(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let root: Value = serde_json::from_str(&content).map_err(|source| CatalogError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    match root {
        Value::Array(records) => {
            debug!("Loaded {} records from {}", records.len(), path.display());
            Ok(records)
        }
        other => Err(CatalogError::NotAnArray {
            path: path.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}

/// Write raw records back to disk, keeping each record's key order
pub fn save_catalog(path: &Path, records: &[Value]) -> Result<()> {
    write_json(path, records)
}

/// Write compiled records as a catalog
pub fn write_catalog(path: &Path, records: &[PromptRecord]) -> Result<()> {
    write_json(path, records)
}

/// Render a value the way catalog files are written
pub fn to_catalog_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(CatalogError::Serialize)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = to_catalog_json(value)?;
    std::fs::write(path, json).map_err(|e| CatalogError::io(path, e))?;
    debug!("Wrote catalog to {}", path.display());
    Ok(())
}

/// Name of a JSON value's type, used in diagnostics
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whether a value counts as present for "missing or empty" checks
///
/// `null`, `false`, zero, the empty string and empty containers are all
/// considered empty.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

/// Plain-text rendering of a value: strings verbatim, anything else as JSON
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Label identifying a record in issues and fix logs
///
/// Records without an id (or with a `null` one) are labelled `unknown`.
pub fn record_label(record: &Value) -> String {
    match record.get("id") {
        None | Some(Value::Null) => "unknown".to_string(),
        Some(id) => value_text(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_catalog_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        std::fs::write(&path, r#"[{"id": "1"}, 42]"#).unwrap();

        let records = load_catalog(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], json!(42));
    }

    #[test]
    fn test_load_catalog_empty_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(load_catalog(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_catalog(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_catalog_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        std::fs::write(&path, "[{").unwrap();
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidJson { .. }));
    }

    #[test]
    fn test_load_catalog_object_root() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        std::fs::write(&path, r#"{"id": "1"}"#).unwrap();
        let err = load_catalog(&path).unwrap_err();
        assert!(matches!(err, CatalogError::NotAnArray { found: "object", .. }));
    }

    #[test]
    fn test_save_catalog_keeps_key_order_and_unicode() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        let records = vec![json!({"prompt": "x", "emoji": "🔧", "id": "1"})];

        save_catalog(&path, &records).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        assert!(written.contains("🔧"));
        assert!(written.find("\"prompt\"").unwrap() < written.find("\"id\"").unwrap());
        assert!(written.starts_with("[\n  {\n    \"prompt\""));
    }

    #[test]
    fn test_is_present() {
        assert!(!is_present(None));
        assert!(!is_present(Some(&json!(null))));
        assert!(!is_present(Some(&json!(""))));
        assert!(!is_present(Some(&json!(0))));
        assert!(!is_present(Some(&json!(false))));
        assert!(!is_present(Some(&json!([]))));
        assert!(is_present(Some(&json!("x"))));
        assert!(is_present(Some(&json!(5))));
        assert!(is_present(Some(&json!(["a"]))));
    }

    #[test]
    fn test_record_label() {
        assert_eq!(record_label(&json!({"id": "3"})), "3");
        assert_eq!(record_label(&json!({"id": 5})), "5");
        assert_eq!(record_label(&json!({"id": null})), "unknown");
        assert_eq!(record_label(&json!({})), "unknown");
        assert_eq!(record_label(&json!("not an object")), "unknown");
    }
}
