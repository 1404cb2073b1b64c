//! EXIF tag extraction via `nom-exif`.
//!
//! Only the IFD0 text tags that feed the record are read. Windows XP tags
//! are surfaced under the taxonomy names they correspond to.

use std::path::Path;

use nom_exif::{EntryValue, Exif, ExifIter, ExifTag, MediaParser, MediaSource};

use crate::error::ImgtagError;
use crate::meta::RawValue;

// IFD0 tag IDs without a dedicated ExifTag variant in use here
const TAG_ARTIST: u16 = 0x013B;
const TAG_COPYRIGHT: u16 = 0x8298;
const TAG_XP_TITLE: u16 = 0x9C9B;
const TAG_XP_COMMENT: u16 = 0x9C9C;
const TAG_XP_KEYWORDS: u16 = 0x9C9E;
const TAG_XP_SUBJECT: u16 = 0x9C9F;

/// Reads EXIF text tags from an image file.
///
/// A file without EXIF data yields an empty list, not an error.
///
/// # Errors
/// Returns [`ImgtagError::Decode`] if the file cannot be opened as media.
pub fn read_exif(path: &Path) -> Result<Vec<(String, RawValue)>, ImgtagError> {
    let mut parser = MediaParser::new();
    let ms = MediaSource::file_path(path).map_err(|err| ImgtagError::Decode {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let iter: ExifIter = match parser.parse(ms) {
        Ok(iter) => iter,
        Err(err) => {
            log::debug!("No EXIF data found in {}: {}", path.display(), err);
            return Ok(Vec::new());
        }
    };
    let exif: Exif = iter.into();

    let mut values = Vec::new();
    let mut push = |name: &str, entry: Option<&EntryValue>| {
        if let Some(text) = entry.and_then(entry_to_string) {
            values.push((name.to_string(), RawValue::Text(text)));
        }
    };

    push("ImageDescription", exif.get(ExifTag::ImageDescription));
    push("UserComment", exif.get(ExifTag::UserComment));
    push("Byline", exif.get_by_ifd_tag_code(0, TAG_ARTIST));
    push("Copyright", exif.get_by_ifd_tag_code(0, TAG_COPYRIGHT));
    push("Title", exif.get_by_ifd_tag_code(0, TAG_XP_TITLE));
    push("Notes", exif.get_by_ifd_tag_code(0, TAG_XP_COMMENT));
    push("Description", exif.get_by_ifd_tag_code(0, TAG_XP_SUBJECT));

    if let Some(keywords) = exif
        .get_by_ifd_tag_code(0, TAG_XP_KEYWORDS)
        .and_then(entry_to_string)
    {
        values.push(("Keywords".to_string(), split_keywords(&keywords)));
    }

    Ok(values)
}

fn entry_to_string(val: &EntryValue) -> Option<String> {
    let s = val.to_string();
    let s = s.trim().trim_matches('"').trim_end_matches('\0').trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// XPKeywords holds one `;`-separated string.
fn split_keywords(raw: &str) -> RawValue {
    RawValue::List(
        raw.split(';')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
    )
}
