use std::path::PathBuf;
use thiserror::Error;

/// The main error type for imgtag operations.
#[derive(Debug, Error)]
pub enum ImgtagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A hierarchical tag value could be parsed neither as nested markup
    /// nor as delimited text.
    #[error("Unrecognized {field} value: {message}")]
    UnrecognizedFormat { field: String, message: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Pass-through failure from an extraction collaborator.
    #[error("Failed to decode metadata from {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Failed to parse exiftool JSON from {path}: {source}")]
    ExiftoolParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write YAML to {path}: {source}")]
    YamlWrite {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("No input files given")]
    NoInput,

    #[error("{failed} of {total} file(s) failed")]
    BatchFailed { failed: usize, total: usize },
}
