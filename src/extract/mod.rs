//! Extraction collaborators.
//!
//! These read raw tag values out of image files (or tool dumps) and hand
//! them to the mapper as [`FieldValues`]. The mapper never depends on
//! which one produced its input.

pub mod exif;
pub mod exiftool;
pub mod xmp;

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ImgtagError;
use crate::meta::{is_valid_format, FieldValues, ImageFormat};

/// Extracts EXIF and XMP tags from one image file.
///
/// # Errors
/// Returns an error if the extension is not a known image format, the file
/// cannot be read, or an embedded XMP packet is malformed.
pub fn extract_file(path: &Path) -> Result<FieldValues, ImgtagError> {
    let format = ImageFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(ImgtagError::Io)?;

    let mut values = FieldValues::new(path.to_string_lossy()).with_format(format);

    if matches!(format, ImageFormat::Jpeg | ImageFormat::Tiff) {
        values.values.extend(exif::read_exif(path)?);
    }
    if format.carries_metadata() {
        values.values.extend(xmp::read_xmp(path, &bytes)?);
    }

    log::debug!(
        "{}: extracted {} raw tag(s)",
        path.display(),
        values.values.len()
    );
    Ok(values)
}

/// Expands input paths into the image files to process.
///
/// Files are kept as given, even with unknown extensions, so that their
/// failure is reported. Directories are walked recursively and contribute
/// only files with a known image extension, sorted by path.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ImgtagError> {
    let mut out = Vec::new();
    for path in paths {
        if !path.is_dir() {
            out.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry.map_err(|err| {
                ImgtagError::Io(
                    err.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                )
            })?;
            if entry.file_type().is_file() && is_valid_format(entry.path()) {
                found.push(entry.into_path());
            }
        }
        found.sort();
        out.extend(found);
    }
    Ok(out)
}
