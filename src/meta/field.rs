//! The closed taxonomy of metadata fields imgtag understands.
//!
//! Every field has a fixed category, multiplicity and hierarchy delimiter.
//! All lookups are pure `match` expressions or `const` tables, so the
//! taxonomy cannot change at runtime.

use std::fmt;
use std::str::FromStr;

/// Separator used when joining tree-structured paths.
pub const TREE_SEPARATOR: &str = " > ";
const BAR_SEPARATOR: &str = "|";
const SLASH_SEPARATOR: &str = "/";

/// A recognized metadata field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    // title fields
    Title,
    Caption,
    // creator fields
    Byline,
    Credit,
    Copyright,
    Source,
    Rights,
    // caption fields
    ImageDescription,
    Notes,
    Description,
    UserComment,
    // tag fields
    Categories,
    HierarchicalSubject,
    CatalogSets,
    LastKeywordXmp,
    TagsList,
    Keywords,
    Subject,
    // read-only image properties
    ImageHeight,
    ImageWidth,
    MimeType,
    FileTypeExtension,
    WebpFlags,
    Duration,
    FileName,
    SourceFile,
}

/// The semantic slot a field feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    Title,
    Creator,
    Caption,
    Tag,
    ReadOnly,
}

/// Whether a field carries one value or a list of values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    Scalar,
    List,
}

/// How a field nominally separates hierarchy levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Delimiter {
    None,
    Bar,
    Slash,
    Tree,
}

impl Delimiter {
    /// The separator string used by [`Field::join`].
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::None => "",
            Delimiter::Bar => BAR_SEPARATOR,
            Delimiter::Slash => SLASH_SEPARATOR,
            Delimiter::Tree => TREE_SEPARATOR,
        }
    }
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Field; 26] = [
        Field::Title,
        Field::Caption,
        Field::Byline,
        Field::Credit,
        Field::Copyright,
        Field::Source,
        Field::Rights,
        Field::ImageDescription,
        Field::Notes,
        Field::Description,
        Field::UserComment,
        Field::Categories,
        Field::HierarchicalSubject,
        Field::CatalogSets,
        Field::LastKeywordXmp,
        Field::TagsList,
        Field::Keywords,
        Field::Subject,
        Field::ImageHeight,
        Field::ImageWidth,
        Field::MimeType,
        Field::FileTypeExtension,
        Field::WebpFlags,
        Field::Duration,
        Field::FileName,
        Field::SourceFile,
    ];

    /// Title fields, highest precedence first.
    pub const TITLE_PRECEDENCE: [Field; 2] = [Field::Title, Field::Caption];

    /// Creator fields, highest precedence first.
    pub const CREATOR_PRECEDENCE: [Field; 5] = [
        Field::Byline,
        Field::Credit,
        Field::Copyright,
        Field::Source,
        Field::Rights,
    ];

    /// Caption fields, highest precedence first.
    pub const CAPTION_PRECEDENCE: [Field; 4] = [
        Field::ImageDescription,
        Field::Notes,
        Field::Description,
        Field::UserComment,
    ];

    /// Tag fields in the order their flattened tags are merged.
    pub const TAG_ORDER: [Field; 7] = [
        Field::Categories,
        Field::HierarchicalSubject,
        Field::CatalogSets,
        Field::LastKeywordXmp,
        Field::TagsList,
        Field::Keywords,
        Field::Subject,
    ];

    /// The canonical tag name, as exiftool spells it.
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Caption => "Caption",
            Field::Byline => "Byline",
            Field::Credit => "Credit",
            Field::Copyright => "Copyright",
            Field::Source => "Source",
            Field::Rights => "Rights",
            Field::ImageDescription => "ImageDescription",
            Field::Notes => "Notes",
            Field::Description => "Description",
            Field::UserComment => "UserComment",
            Field::Categories => "Categories",
            Field::HierarchicalSubject => "HierarchicalSubject",
            Field::CatalogSets => "CatalogSets",
            Field::LastKeywordXmp => "LastKeywordXMP",
            Field::TagsList => "TagsList",
            Field::Keywords => "Keywords",
            Field::Subject => "Subject",
            Field::ImageHeight => "ImageHeight",
            Field::ImageWidth => "ImageWidth",
            Field::MimeType => "MIMEType",
            Field::FileTypeExtension => "FileTypeExtension",
            Field::WebpFlags => "WebP_Flags",
            Field::Duration => "Duration",
            Field::FileName => "FileName",
            Field::SourceFile => "SourceFile",
        }
    }

    /// Looks up a field by raw tag name.
    ///
    /// Matching ignores ASCII case and an optional `Group:` prefix, so
    /// `categories`, `XMP:HierarchicalSubject` and `IFD0:ImageDescription`
    /// all resolve. Returns `None` for names outside the taxonomy.
    pub fn from_tag_name(raw: &str) -> Option<Field> {
        let name = raw.rsplit(':').next().unwrap_or(raw).trim();
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.name().eq_ignore_ascii_case(name))
    }

    pub fn category(self) -> FieldCategory {
        match self {
            Field::Title | Field::Caption => FieldCategory::Title,
            Field::Byline | Field::Credit | Field::Copyright | Field::Source | Field::Rights => {
                FieldCategory::Creator
            }
            Field::ImageDescription | Field::Notes | Field::Description | Field::UserComment => {
                FieldCategory::Caption
            }
            Field::Categories
            | Field::HierarchicalSubject
            | Field::CatalogSets
            | Field::LastKeywordXmp
            | Field::TagsList
            | Field::Keywords
            | Field::Subject => FieldCategory::Tag,
            Field::ImageHeight
            | Field::ImageWidth
            | Field::MimeType
            | Field::FileTypeExtension
            | Field::WebpFlags
            | Field::Duration
            | Field::FileName
            | Field::SourceFile => FieldCategory::ReadOnly,
        }
    }

    pub fn multiplicity(self) -> Multiplicity {
        match self.category() {
            FieldCategory::Tag => Multiplicity::List,
            _ => Multiplicity::Scalar,
        }
    }

    /// The field's nominal hierarchy delimiter.
    pub fn delimiter(self) -> Delimiter {
        match self {
            Field::HierarchicalSubject | Field::CatalogSets => Delimiter::Bar,
            Field::LastKeywordXmp => Delimiter::Slash,
            Field::Categories | Field::TagsList | Field::Keywords => Delimiter::Tree,
            _ => Delimiter::None,
        }
    }

    /// True when raw values are tag paths or nested category markup.
    pub fn is_hierarchical(self) -> bool {
        self.delimiter() != Delimiter::None
    }

    /// Splits raw text into path segments.
    ///
    /// `|`, `/` and `" > "` are all accepted as separators whatever the
    /// field's nominal delimiter. Segments are trimmed and empty segments
    /// dropped, so whitespace-only input yields no segments.
    pub fn split(self, text: &str) -> Vec<String> {
        split_path(text)
    }

    /// Joins path segments with the field's own delimiter.
    pub fn join<S: AsRef<str>>(self, segments: &[S]) -> String {
        let sep = self.delimiter().as_str();
        segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(sep)
    }
}

/// Splits a tag path on any admissible separator.
pub fn split_path(text: &str) -> Vec<String> {
    text.split(TREE_SEPARATOR)
        .flat_map(|part| part.split(['|', '/']))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_tag_name(s).ok_or_else(|| format!("'{s}'"))
    }
}
