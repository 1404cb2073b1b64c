//! YAML output for metadata records.
//!
//! Every written document is terminated with a `---` line so that several
//! outputs can be concatenated into one stream.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::ImgtagError;

const DOCUMENT_END: &str = "---\n";

/// Writes any serializable value as a YAML document to a file.
///
/// # Errors
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_yaml<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ImgtagError> {
    let yaml = to_yaml_string(value).map_err(|source| ImgtagError::YamlWrite {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, yaml).map_err(ImgtagError::Io)
}

/// Serializes a value to a YAML document string, end marker included.
pub fn to_yaml_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_yaml::Error> {
    let mut yaml = serde_yaml::to_string(value)?;
    yaml.push_str(DOCUMENT_END);
    Ok(yaml)
}
