//! Reader for `exiftool -json` dumps.
//!
//! exiftool emits an array with one object per file. Each object has a
//! `SourceFile` key plus tag name → value pairs, where values are strings,
//! numbers or arrays. This is the easiest way to feed imgtag tags from
//! formats it cannot read itself:
//!
//! ```text
//! exiftool -json -Title -Subject -HierarchicalSubject photos/ > tags.json
//! imgtag --exiftool tags.json
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::ImgtagError;
use crate::meta::{FieldValues, RawValue};

const SOURCE_FILE_KEY: &str = "SourceFile";

/// Reads every entry of an exiftool JSON dump.
///
/// # Errors
/// Returns an error if the file cannot be read, is not an exiftool JSON
/// array, or an entry lacks `SourceFile`.
pub fn read_exiftool_json(path: &Path) -> Result<Vec<FieldValues>, ImgtagError> {
    let file = File::open(path).map_err(ImgtagError::Io)?;
    let reader = BufReader::new(file);

    let entries: Vec<Map<String, Value>> =
        serde_json::from_reader(reader).map_err(|source| ImgtagError::ExiftoolParse {
            path: path.to_path_buf(),
            source,
        })?;
    entries_to_field_values(path, entries)
}

/// Reads an exiftool JSON dump from a string.
///
/// Useful for testing without file I/O.
pub fn from_exiftool_str(json: &str) -> Result<Vec<FieldValues>, ImgtagError> {
    let path = PathBuf::from("<memory>");
    let entries: Vec<Map<String, Value>> =
        serde_json::from_str(json).map_err(|source| ImgtagError::ExiftoolParse {
            path: path.clone(),
            source,
        })?;
    entries_to_field_values(&path, entries)
}

fn entries_to_field_values(
    path: &Path,
    entries: Vec<Map<String, Value>>,
) -> Result<Vec<FieldValues>, ImgtagError> {
    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| entry_to_field_values(path, idx, entry))
        .collect()
}

fn entry_to_field_values(
    path: &Path,
    idx: usize,
    entry: Map<String, Value>,
) -> Result<FieldValues, ImgtagError> {
    let identifier = entry
        .get(SOURCE_FILE_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| ImgtagError::Decode {
            path: path.to_path_buf(),
            message: format!("entry {idx} has no '{SOURCE_FILE_KEY}' string"),
        })?
        .to_string();

    let mut values = FieldValues::new(identifier);
    for (name, value) in entry {
        if name == SOURCE_FILE_KEY {
            continue;
        }
        if let Some(raw) = json_to_raw(&value) {
            values.insert(name, raw);
        }
    }
    Ok(values)
}

fn json_to_raw(value: &Value) -> Option<RawValue> {
    match value {
        Value::Array(items) => Some(RawValue::List(
            items.iter().filter_map(scalar_to_string).collect(),
        )),
        other => scalar_to_string(other).map(RawValue::Text),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
