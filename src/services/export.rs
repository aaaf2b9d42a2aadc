//! Flattening record collections into comma-delimited text.
//!
//! Every cell is wrapped in double quotes and rows end with CRLF. Embedded
//! quotes, commas and line breaks are written as-is, without escaping, so
//! values containing them produce a table that other tools will misread.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::errors::ServiceError;

pub const LINE_TERMINATOR: &str = "\r\n";
const DELIMITER: &str = ",";

/// Serialises `records` into a quoted, CRLF-terminated table.
///
/// The header is the field names of the first record in declaration order;
/// each row lists its values in header order.
#[instrument(skip_all, fields(rows = records.len()))]
pub fn to_delimited<T: Serialize>(records: &[T]) -> Result<String, ServiceError> {
    if records.is_empty() {
        return Err(empty_collection());
    }
    let rows = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    render_rows(&rows)
}

/// Same as [`to_delimited`] for an arbitrary JSON value, which must be a
/// non-empty array of objects.
pub fn to_delimited_value(value: &Value) -> Result<String, ServiceError> {
    match value {
        Value::Array(rows) if rows.is_empty() => Err(empty_collection()),
        Value::Array(rows) => render_rows(rows),
        other => Err(ServiceError::invalid_input(format!(
            "expected an array of records, got {}",
            json_kind(other)
        ))),
    }
}

/// Writes an exported table to `dir/file_name`, creating `dir` if needed.
pub fn write_export(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, ServiceError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, contents)?;
    info!(path = %path.display(), bytes = contents.len(), "wrote export");
    Ok(path)
}

fn render_rows(rows: &[Value]) -> Result<String, ServiceError> {
    let header: Vec<&str> = match rows.first() {
        Some(first) => as_record(first, 0)?.keys().map(String::as_str).collect(),
        None => return Err(empty_collection()),
    };

    let mut out = quoted_line(header.iter().copied());

    for (idx, row) in rows.iter().enumerate() {
        let record = as_record(row, idx)?;
        let cells: Vec<String> = header
            .iter()
            .map(|key| record.get(*key).map(cell_text).unwrap_or_default())
            .collect();
        out.push_str(&quoted_line(cells.iter().map(String::as_str)));
    }

    Ok(out)
}

fn quoted_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = cells
        .map(|cell| format!("\"{cell}\""))
        .collect::<Vec<_>>()
        .join(DELIMITER);
    line.push_str(LINE_TERMINATOR);
    line
}

fn as_record(row: &Value, idx: usize) -> Result<&Map<String, Value>, ServiceError> {
    row.as_object().ok_or_else(|| {
        ServiceError::invalid_input(format!(
            "row {idx} is {}, expected an object",
            json_kind(row)
        ))
    })
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn empty_collection() -> ServiceError {
    ServiceError::invalid_input("cannot build a delimited table from an empty collection")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[derive(Serialize)]
    struct Pair {
        a: i32,
        b: i32,
    }

    #[test]
    fn two_rows() {
        let rows = [Pair { a: 1, b: 2 }, Pair { a: 3, b: 4 }];
        assert_eq!(
            to_delimited(&rows).unwrap(),
            "\"a\",\"b\"\r\n\"1\",\"2\"\r\n\"3\",\"4\"\r\n"
        );
    }

    #[test]
    fn header_follows_first_record_key_order() {
        let value = json!([{ "z": 1, "a": "x" }, { "a": "y", "z": 2 }]);
        assert_eq!(
            to_delimited_value(&value).unwrap(),
            "\"z\",\"a\"\r\n\"1\",\"x\"\r\n\"2\",\"y\"\r\n"
        );
    }

    #[test]
    fn empty_collection_is_rejected() {
        let rows: [Pair; 0] = [];
        assert_matches!(to_delimited(&rows), Err(ServiceError::InvalidInput(_)));
        assert_matches!(to_delimited_value(&json!([])), Err(ServiceError::InvalidInput(_)));
    }

    #[test]
    fn non_sequence_input_is_rejected() {
        let err = to_delimited_value(&json!({ "a": 1 })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: expected an array of records, got an object"
        );
        assert_matches!(to_delimited_value(&json!("a,b")), Err(ServiceError::InvalidInput(_)));
    }

    #[test]
    fn non_object_rows_are_rejected() {
        let err = to_delimited_value(&json!([{ "a": 1 }, 5])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: row 1 is a number, expected an object");
    }

    #[test]
    fn cells_are_not_escaped() {
        let value = json!([{ "note": "say \"hi\", bye", "missing": null, "tags": [1, 2] }]);
        assert_eq!(
            to_delimited_value(&value).unwrap(),
            "\"note\",\"missing\",\"tags\"\r\n\"say \"hi\", bye\",\"\",\"1,2\"\r\n"
        );
    }

    #[test]
    fn writes_export_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(&dir.path().join("nested"), "pairs.csv", "\"a\"\r\n").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "\"a\"\r\n");
    }
}
