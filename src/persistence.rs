// Persistence Adapter - JSON file <-> record store
// The file is a single array of {date, category, amount, description} objects

use crate::error::{ExpenseError, Result};
use crate::record::Expense;
use crate::store::ExpenseStore;
use crate::validation::validate_record;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Write `records` to `path` as an indented JSON array, in order.
/// An existing file is overwritten.
pub fn save(path: &Path, records: &[Expense]) -> Result<()> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records
        .serialize(&mut serializer)
        .map_err(|e| ExpenseError::Unclassified(e.into()))?;
    buffer.push(b'\n');

    fs::write(path, &buffer).map_err(|source| ExpenseError::IoFailure {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), records = records.len(), "expenses saved");
    Ok(())
}

/// Read and check every record in the file at `path`.
///
/// All or nothing: one bad record rejects the whole file.
pub fn load(path: &Path) -> Result<Vec<Expense>> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ExpenseError::FileNotFound(path.to_path_buf()),
        ErrorKind::InvalidData => ExpenseError::MalformedData {
            path: path.to_path_buf(),
            reason: "file is not valid UTF-8".to_string(),
        },
        _ => ExpenseError::IoFailure {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let records: Vec<Expense> =
        serde_json::from_str(&content).map_err(|e| ExpenseError::MalformedData {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    for (index, expense) in records.iter().enumerate() {
        validate_record(expense).map_err(|reason| ExpenseError::MalformedData {
            path: path.to_path_buf(),
            reason: format!("record {}: {}", index, reason),
        })?;
    }

    Ok(records)
}

/// Load `path` and replace the store's contents with it.
/// On any error the store is left exactly as it was.
pub fn load_into(store: &mut ExpenseStore, path: &Path) -> Result<usize> {
    let records = load(path)?;
    let count = records.len();
    store.replace_all(records);

    tracing::info!(path = %path.display(), records = count, "expenses loaded");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_store() -> ExpenseStore {
        let mut store = ExpenseStore::new();
        store.add("2024-03-01", "Food", "12.50", "lunch").unwrap();
        store.add("2024-03-02", "Food", "7,25", "snack").unwrap();
        store.add("2024-02-28", "Transport", "0.1", "").unwrap();
        store.add("2024-02-28", "Café & Bar", "3.333333", "with \"quotes\"").unwrap();
        store
    }

    #[test]
    fn test_save_then_load_preserves_records_and_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        let store = sample_store();

        save(&path, store.snapshot()).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, store.snapshot());
    }

    #[test]
    fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        let mut store = ExpenseStore::new();
        store.add("2024-03-01", "Food", "12.50", "lunch").unwrap();

        save(&path, store.snapshot()).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.starts_with("[\n    {\n        \"date\": \"2024-03-01\""));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["amount"], serde_json::json!(12.5));
    }

    #[test]
    fn test_save_empty_store_writes_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");

        save(&path, &[]).unwrap();
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_save_into_missing_directory_is_io_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("expenses.json");

        let err = save(&path, sample_store().snapshot()).unwrap_err();
        assert!(matches!(err, ExpenseError::IoFailure { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, ExpenseError::FileNotFound(p) if p == path));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{\"date\": ").unwrap();

        assert!(matches!(load(&path), Err(ExpenseError::MalformedData { .. })));
    }

    #[test]
    fn test_load_wrong_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("object.json");

        for content in [
            r#"{"date": "2024-03-01"}"#,
            r#"[1, 2, 3]"#,
            r#"[{"date": "2024-03-01", "category": "Food", "amount": "12.5", "description": ""}]"#,
            r#"[{"date": "2024-03-01", "category": "Food", "description": ""}]"#,
        ] {
            fs::write(&path, content).unwrap();
            assert!(
                matches!(load(&path), Err(ExpenseError::MalformedData { .. })),
                "{} should be rejected",
                content
            );
        }
    }

    #[test]
    fn test_load_rejects_invalid_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"[
                {"date": "2024-03-01", "category": "Food", "amount": 5, "description": "ok"},
                {"date": "2024-03-02", "category": "Food", "amount": -5, "description": "refund"}
            ]"#,
        )
        .unwrap();

        match load(&path) {
            Err(ExpenseError::MalformedData { reason, .. }) => assert!(reason.contains("record 1")),
            other => panic!("expected MalformedData, got {:?}", other),
        }

        fs::write(
            &path,
            r#"[{"date": "2024-13-01", "category": "Food", "amount": 5, "description": ""}]"#,
        )
        .unwrap();
        assert!(matches!(load(&path), Err(ExpenseError::MalformedData { .. })));
    }

    #[test]
    fn test_load_into_keeps_store_on_failure() {
        let dir = TempDir::new().unwrap();
        let mut store = sample_store();
        let before = store.clone();

        let err = load_into(&mut store, &dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ExpenseError::FileNotFound(_)));
        assert_eq!(store, before);

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "not json").unwrap();
        assert!(load_into(&mut store, &broken).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn test_load_into_replaces_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.json");
        let saved = sample_store();
        save(&path, saved.snapshot()).unwrap();

        let mut store = ExpenseStore::new();
        store.add("2020-01-01", "Old", "1", "gone").unwrap();
        let count = load_into(&mut store, &path).unwrap();

        assert_eq!(count, 4);
        assert_eq!(store, saved);
    }
}
