//! Canonical image metadata for imgtag.
//!
//! This module holds the format-agnostic core: the field taxonomy, the
//! hierarchical tag tree, the mapper that routes raw tag values into a
//! record, and the writers that serialize records.
//!
//! # Data flow
//!
//! 1. An extraction collaborator (see [`crate::extract`]) produces
//!    [`FieldValues`]: raw `(tag name, value)` pairs for one file.
//! 2. [`map_fields`] resolves each name to a [`Field`], parses hierarchical
//!    values into a [`TagTree`] and flattens them into the subject list.
//! 3. The resulting [`MetadataRecord`] is serialized as YAML or JSON.
//!
//! # Example
//!
//! ```
//! use imgtag::meta::{map_fields, FieldValues};
//!
//! let input = FieldValues::new("photos/img001.jpg")
//!     .with("HierarchicalSubject", "Animals|Dogs|Poodle")
//!     .with("Credit", "Jane Doe");
//!
//! let record = map_fields(&input).unwrap();
//! assert_eq!(record.title, vec!["img001"]);
//! assert_eq!(record.subject, vec!["Animals", "Dogs", "Poodle"]);
//! ```

mod field;
mod format;
pub mod io_json;
pub mod io_yaml;
mod mapper;
mod output;
mod record;
mod tags;

// Re-export core types for convenient access
pub use field::{split_path, Delimiter, Field, FieldCategory, Multiplicity, TREE_SEPARATOR};
pub use format::{is_valid_format, ImageFormat};
pub use mapper::{map_fields, FieldValues, RawValue};
pub use output::OutputFormat;
pub use record::{fallback_title, MetadataRecord};
pub use tags::{dedup_preserving_order, MarkupError, TagNode, TagTree};
