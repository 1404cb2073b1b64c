//! Routing raw tag values into a [`MetadataRecord`].
//!
//! An extraction collaborator hands over whatever tags it found as
//! `(name, value)` pairs. The mapper looks each name up in the field
//! taxonomy and fills the matching record slot:
//!
//! | Category | Slot          | Precedence (highest first)                          |
//! |----------|---------------|-----------------------------------------------------|
//! | title    | `title`       | Title, Caption                                      |
//! | creator  | `creator`     | Byline, Credit, Copyright, Source, Rights           |
//! | caption  | `description` | ImageDescription, Notes, Description, UserComment   |
//! | tag      | `subject`     | all tag fields merged, see [`Field::TAG_ORDER`]     |
//!
//! Precedence depends only on the field, never on the order tags arrive
//! in. Unknown names and read-only properties are skipped.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::field::Field;
use super::format::ImageFormat;
use super::record::MetadataRecord;
use super::tags::{TagNode, TagTree};
use crate::error::ImgtagError;

/// A raw tag value as surfaced by an extraction collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    List(Vec<String>),
}

impl RawValue {
    /// The value's strings, a single one for [`RawValue::Text`].
    pub fn items(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            RawValue::Text(text) => std::slice::from_ref(text),
            RawValue::List(list) => list,
        };
        items.iter().map(String::as_str)
    }

    /// First non-blank string, trimmed.
    pub fn first_text(&self) -> Option<&str> {
        self.items().map(str::trim).find(|item| !item.is_empty())
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(value: Vec<String>) -> Self {
        RawValue::List(value)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(value: Vec<&str>) -> Self {
        RawValue::List(value.into_iter().map(ToOwned::to_owned).collect())
    }
}

/// Everything extracted from one source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldValues {
    /// Source file reference, usually its path.
    pub identifier: String,
    /// Container format, when the collaborator detected one.
    pub format: Option<ImageFormat>,
    /// Raw `(tag name, value)` pairs in the order they were found.
    pub values: Vec<(String, RawValue)>,
}

impl FieldValues {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Builder-style [`FieldValues::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.values.push((name.into(), value.into()));
    }

    /// First value whose name resolves to `field`.
    pub fn get(&self, field: Field) -> Option<&RawValue> {
        self.values
            .iter()
            .find(|(name, _)| Field::from_tag_name(name) == Some(field))
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Maps one file's raw values to its canonical record.
///
/// # Errors
/// Returns [`ImgtagError::UnrecognizedFormat`] when a hierarchical field
/// holds markup that does not parse. No partial record is returned in that
/// case. Missing fields are never an error.
pub fn map_fields(input: &FieldValues) -> Result<MetadataRecord, ImgtagError> {
    let mut by_field: BTreeMap<Field, Vec<&RawValue>> = BTreeMap::new();
    for (name, value) in &input.values {
        match Field::from_tag_name(name) {
            Some(field) => by_field.entry(field).or_default().push(value),
            None => log::debug!("{}: ignoring unrecognized tag '{}'", input.identifier, name),
        }
    }

    let mut record = MetadataRecord::new(input.identifier.clone(), detect_format(input, &by_field));

    record.title = first_scalar(&by_field, &Field::TITLE_PRECEDENCE);
    record.creator = first_scalar(&by_field, &Field::CREATOR_PRECEDENCE);
    record.description = first_scalar(&by_field, &Field::CAPTION_PRECEDENCE);
    record.subject = collect_subject(&by_field)?;

    record.apply_title_fallback();
    Ok(record)
}

fn first_scalar(by_field: &BTreeMap<Field, Vec<&RawValue>>, precedence: &[Field]) -> Vec<String> {
    precedence
        .iter()
        .filter_map(|field| by_field.get(field))
        .flat_map(|values| values.iter())
        .find_map(|value| value.first_text())
        .map(|text| vec![text.to_string()])
        .unwrap_or_default()
}

fn collect_subject(by_field: &BTreeMap<Field, Vec<&RawValue>>) -> Result<Vec<String>, ImgtagError> {
    let mut tree = TagTree::new();

    for field in Field::TAG_ORDER {
        let Some(values) = by_field.get(&field) else {
            continue;
        };

        for item in values.iter().flat_map(|value| value.items()) {
            if field.is_hierarchical() {
                tree.extend(TagTree::parse(field, item)?);
            } else if !item.trim().is_empty() {
                tree.extend(TagTree::from_nodes(vec![TagNode::new(item.trim())]));
            }
        }
    }

    Ok(tree.flatten())
}

fn detect_format(input: &FieldValues, by_field: &BTreeMap<Field, Vec<&RawValue>>) -> String {
    if let Some(format) = input.format {
        return format.mime_type().to_string();
    }
    if let Ok(format) = ImageFormat::from_path(Path::new(&input.identifier)) {
        return format.mime_type().to_string();
    }
    by_field
        .get(&Field::MimeType)
        .and_then(|values| values.iter().find_map(|value| value.first_text()))
        .unwrap_or_default()
        .to_string()
}
