//! Dataset loading: delimited text and JSON sources normalized into columns
//! of raw cells.
//!
//! Whatever the source format, loading produces the same shape: the raw
//! header sequence in source order plus one value vector per column, each
//! exactly `row_count` long. Cells a row does not supply are `Null`, which
//! the inference step later discards during cleaning.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use thiserror::Error;

use crate::{cli::SourceFormat, io_utils, value::RawValue};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset contains no data rows")]
    Empty,
    #[error("JSON input must be a top-level array of objects")]
    MalformedJson,
}

#[derive(Debug)]
pub struct Dataset {
    /// Raw column names exactly as they appear in the source.
    pub headers: Vec<String>,
    /// Column-major cell values; `columns[i].len() == row_count` for all `i`.
    pub columns: Vec<Vec<RawValue>>,
    pub row_count: usize,
}

pub fn resolve_format(path: &Path, provided: Option<SourceFormat>) -> SourceFormat {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
        _ => SourceFormat::Csv,
    })
}

pub fn load(
    path: &Path,
    format: Option<SourceFormat>,
    delimiter: Option<u8>,
    encoding: &'static Encoding,
) -> Result<Dataset> {
    match resolve_format(path, format) {
        SourceFormat::Csv => {
            let delimiter = io_utils::resolve_input_delimiter(path, delimiter);
            load_delimited(path, delimiter, encoding)
        }
        SourceFormat::Json => load_json(path, encoding),
    }
}

fn load_delimited(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Dataset> {
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let mut record = csv::ByteRecord::new();

    if !reader
        .read_byte_record(&mut record)
        .context("Reading header row")?
    {
        return Err(DatasetError::Empty.into());
    }
    let headers: Vec<String> = record
        .iter()
        .map(|field| io_utils::decode_bytes(field, encoding))
        .collect::<Result<_>>()
        .context("Decoding header row")?;

    let mut columns: Vec<Vec<RawValue>> = vec![Vec::new(); headers.len()];
    let mut row_count = 0usize;
    while reader
        .read_byte_record(&mut record)
        .context("Reading data row")?
    {
        for (idx, column) in columns.iter_mut().enumerate() {
            let cell = match record.get(idx) {
                Some(field) if !field.is_empty() => {
                    RawValue::Text(io_utils::decode_bytes(field, encoding)?)
                }
                _ => RawValue::Null,
            };
            column.push(cell);
        }
        row_count += 1;
    }

    if row_count == 0 {
        return Err(DatasetError::Empty.into());
    }

    Ok(Dataset {
        headers,
        columns,
        row_count,
    })
}

fn load_json(path: &Path, encoding: &'static Encoding) -> Result<Dataset> {
    let text = io_utils::read_input_to_string(path, encoding)?;
    let parsed: serde_json::Value = serde_json::from_str(&text).context("Parsing JSON input")?;
    let rows = parsed.as_array().ok_or(DatasetError::MalformedJson)?;

    let mut objects = Vec::with_capacity(rows.len());
    for row in rows {
        let object = row.as_object().ok_or(DatasetError::MalformedJson)?;
        objects.push(object);
    }
    if objects.is_empty() {
        return Err(DatasetError::Empty.into());
    }

    // Column order follows first appearance across all rows; the
    // preserve_order feature keeps per-object key order intact.
    let mut headers: Vec<String> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !headers.iter().any(|existing| existing == key) {
                headers.push(key.clone());
            }
        }
    }

    let columns = headers
        .iter()
        .map(|header| {
            objects
                .iter()
                .map(|object| object.get(header).map(json_to_raw).unwrap_or(RawValue::Null))
                .collect()
        })
        .collect();

    Ok(Dataset {
        headers,
        columns,
        row_count: objects.len(),
    })
}

fn json_to_raw(value: &serde_json::Value) -> RawValue {
    match value {
        serde_json::Value::Null => RawValue::Null,
        serde_json::Value::Bool(b) => RawValue::Boolean(*b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => RawValue::Number(f),
            None => RawValue::Text(n.to_string()),
        },
        serde_json::Value::String(s) => RawValue::Text(s.clone()),
        other => RawValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use encoding_rs::UTF_8;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp");
        file
    }

    #[test]
    fn csv_cells_become_text_and_empty_fields_null() {
        let file = write_temp("name,age\nAlice,30\nBob,\n", ".csv");
        let dataset = load(file.path(), None, None, UTF_8).expect("load csv");
        assert_eq!(dataset.headers, vec!["name", "age"]);
        assert_eq!(dataset.row_count, 2);
        assert_eq!(dataset.columns[1][0], RawValue::Text("30".to_string()));
        assert_eq!(dataset.columns[1][1], RawValue::Null);
    }

    #[test]
    fn csv_with_only_a_header_row_is_empty() {
        let file = write_temp("name,age\n", ".csv");
        let err = load(file.path(), None, None, UTF_8).unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn short_rows_are_padded_with_nulls() {
        let file = write_temp("a,b,c\n1,2\n", ".csv");
        let dataset = load(file.path(), None, None, UTF_8).expect("load csv");
        assert_eq!(dataset.columns[2][0], RawValue::Null);
    }

    #[test]
    fn json_preserves_key_order_and_typed_values() {
        let file = write_temp(
            r#"[{"name":"Alice","age":30,"active":true},{"name":"Bob","age":null}]"#,
            ".json",
        );
        let dataset = load(file.path(), None, None, UTF_8).expect("load json");
        assert_eq!(dataset.headers, vec!["name", "age", "active"]);
        assert_eq!(dataset.columns[1][0], RawValue::Number(30.0));
        assert_eq!(dataset.columns[1][1], RawValue::Null);
        assert_eq!(dataset.columns[2][0], RawValue::Boolean(true));
        assert_eq!(dataset.columns[2][1], RawValue::Null);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let file = write_temp(r#"{"name":"Alice"}"#, ".json");
        let err = load(file.path(), None, None, UTF_8).unwrap_err();
        assert!(err.to_string().contains("array of objects"));
    }

    #[test]
    fn format_override_beats_extension() {
        let file = write_temp(r#"[{"x":1}]"#, ".txt");
        let dataset =
            load(file.path(), Some(SourceFormat::Json), None, UTF_8).expect("load as json");
        assert_eq!(dataset.headers, vec!["x"]);
    }
}
