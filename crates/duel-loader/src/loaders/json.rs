//! JSON loader
//!
//! Accepts the three common table layouts:
//! - records: `[{"a": 1, "b": 2}, ...]`
//! - columns: `{"a": [1, 2], "b": [3, 4]}`
//! - indexed columns: `{"a": {"0": 1, "1": 2}, ...}`

use crate::error::{LoadError, LoadResult};
use crate::file::FileType;
use crate::loaders::TableLoader;
use duel_model::{Column, Dataset, Scalar};
use serde_json::{Map, Value};

/// JSON loader
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl JsonLoader {
    /// Create new JSON loader
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TableLoader for JsonLoader {
    fn file_type(&self) -> FileType {
        FileType::Json
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn load(&self, bytes: &[u8]) -> LoadResult<Dataset> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| LoadError::parse(FileType::Json, e))?;

        match value {
            Value::Array(items) => from_records(items),
            Value::Object(map) => from_columns(map),
            _ => Err(LoadError::parse(
                FileType::Json,
                "expected an array of records or an object of columns",
            )),
        }
    }
}

fn from_records(items: Vec<Value>) -> LoadResult<Dataset> {
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(map) => records.push(map),
            _ => {
                return Err(LoadError::parse(
                    FileType::Json,
                    format!("record {index} is not an object"),
                ))
            }
        }
    }

    // Union of keys in first-seen order
    let mut headers: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records.iter().map(|record| {
        headers
            .iter()
            .map(|h| record.get(h).map_or(Scalar::Null, to_scalar))
            .collect::<Vec<_>>()
    });

    Dataset::from_rows(headers.clone(), rows)
        .map_err(|e| LoadError::invalid_shape(FileType::Json, &e))
}

fn from_columns(map: Map<String, Value>) -> LoadResult<Dataset> {
    if map.values().all(Value::is_array) {
        let columns = map
            .into_iter()
            .map(|(name, values)| {
                let values = match values {
                    Value::Array(items) => items.iter().map(to_scalar).collect(),
                    _ => Vec::new(),
                };
                Column::new(name, values)
            })
            .collect();
        return Dataset::new(columns).map_err(|e| LoadError::invalid_shape(FileType::Json, &e));
    }

    if map.values().all(Value::is_object) {
        let mut index: Vec<&String> = Vec::new();
        for column in map.values().filter_map(Value::as_object) {
            for key in column.keys() {
                if !index.contains(&key) {
                    index.push(key);
                }
            }
        }

        let columns = map
            .iter()
            .map(|(name, values)| {
                let values = values.as_object().map_or_else(Vec::new, |cells| {
                    index
                        .iter()
                        .map(|key| cells.get(*key).map_or(Scalar::Null, to_scalar))
                        .collect()
                });
                Column::new(name.clone(), values)
            })
            .collect();
        return Dataset::new(columns).map_err(|e| LoadError::invalid_shape(FileType::Json, &e));
    }

    Err(LoadError::parse(
        FileType::Json,
        "column values must all be arrays or all be objects",
    ))
}

fn to_scalar(value: &Value) -> Scalar {
    match value {
        Value::Null => Scalar::Null,
        Value::Bool(b) => Scalar::Bool(*b),
        Value::Number(n) => n
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| n.as_f64().map(Scalar::Float))
            .unwrap_or_else(|| Scalar::Text(n.to_string())),
        Value::String(s) => Scalar::Text(s.clone()),
        nested => Scalar::Text(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_records() {
        let ds = JsonLoader
            .load(br#"[{"name": "duck", "n": 1}, {"name": "pg", "n": 2.5, "extra": true}]"#)
            .unwrap();

        assert_eq!(ds.column_names(), vec!["name", "n", "extra"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column("extra").unwrap().values, vec![Scalar::Null, Scalar::Bool(true)]);
        assert_eq!(ds.column("n").unwrap().values, vec![Scalar::Int(1), Scalar::Float(2.5)]);
    }

    #[test]
    fn json_columns_keep_order() {
        let ds = JsonLoader.load(br#"{"z": [1, 2], "a": ["x", null]}"#).unwrap();
        assert_eq!(ds.column_names(), vec!["z", "a"]);
        assert_eq!(ds.column("a").unwrap().values, vec![Scalar::Text("x".into()), Scalar::Null]);
    }

    #[test]
    fn json_indexed_columns() {
        let ds = JsonLoader
            .load(br#"{"A": {"0": 1, "1": 2}, "B": {"1": 4}}"#)
            .unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column("B").unwrap().values, vec![Scalar::Null, Scalar::Int(4)]);
    }

    #[test]
    fn json_ragged_columns_fail() {
        let err = JsonLoader.load(br#"{"a": [1, 2], "b": [1]}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse { file_type: FileType::Json, .. }));
    }

    #[test]
    fn json_scalar_columns_fail() {
        assert!(JsonLoader.load(br#"{"a": 1}"#).is_err());
    }

    #[test]
    fn json_invalid_syntax_fails() {
        assert!(JsonLoader.load(br#"{"name": "test", "value":}"#).is_err());
    }

    #[test]
    fn json_non_object_record_fails() {
        let err = JsonLoader.load(b"[1, 2]").unwrap_err();
        assert!(err.to_string().contains("record 0 is not an object"));
    }

    #[test]
    fn json_empty_array_is_empty_dataset() {
        let ds = JsonLoader.load(b"[]").unwrap();
        assert!(ds.is_empty());
    }
}
