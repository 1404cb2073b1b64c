//! JSON output for metadata records.
//!
//! Records are written pretty-printed with two-space indentation, either
//! one record per file or a whole batch as a single array.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::ImgtagError;

/// Writes any serializable value as pretty JSON to a file.
///
/// # Errors
/// Returns an error if the file cannot be created or serialization fails.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ImgtagError> {
    let file = File::create(path).map_err(ImgtagError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| ImgtagError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })?;
    writeln!(writer).map_err(ImgtagError::Io)?;
    writer.flush().map_err(ImgtagError::Io)
}

/// Serializes a value to a pretty JSON string.
///
/// Useful for testing without file I/O.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
