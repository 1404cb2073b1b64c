//! The canonical metadata record.
//!
//! This is the normalized, format-agnostic output of mapping one file's raw
//! tags. Field order here is the order serializers emit.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Dublin Core style description of a single image.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Normally a single entry; never empty once mapped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub title: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creator: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<String>,

    /// Flattened tags, duplicate-free, in first-seen order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subject: Vec<String>,

    /// Reference to the source file.
    pub identifier: String,

    /// MIME type of the source container, empty when unknown.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format: String,
}

impl MetadataRecord {
    pub fn new(identifier: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            format: format.into(),
            ..Default::default()
        }
    }

    /// Fills an empty title from the identifier's file stem.
    ///
    /// `photos/img001.jpg` gives `img001`. A title that is already present
    /// is left alone.
    pub fn apply_title_fallback(&mut self) {
        if self.title.is_empty() {
            self.title = vec![fallback_title(&self.identifier)];
        }
    }
}

/// Base name of `identifier` with its extension stripped.
pub fn fallback_title(identifier: &str) -> String {
    let path = Path::new(identifier);
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| identifier.to_string())
}
