//! Image container formats recognized from file names.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ImgtagError;

/// A container format imgtag can label a record with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Tiff,
    Bmp,
    Pdf,
    Webp,
    Html,
    Base64,
}

const FORMAT_EXTENSIONS: [(ImageFormat, &[&str]); 9] = [
    (ImageFormat::Jpeg, &["jpg", "jpeg"]),
    (ImageFormat::Png, &["png"]),
    (ImageFormat::Gif, &["gif"]),
    (ImageFormat::Tiff, &["tif", "tiff"]),
    (ImageFormat::Bmp, &["bmp"]),
    (ImageFormat::Pdf, &["pdf"]),
    (ImageFormat::Webp, &["webp"]),
    (ImageFormat::Html, &["html"]),
    (ImageFormat::Base64, &["b64", "uue"]),
];

impl ImageFormat {
    /// Parses a format from an extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Result<Self, ImgtagError> {
        let wanted = ext.trim_start_matches('.');
        FORMAT_EXTENSIONS
            .iter()
            .find(|(_, exts)| exts.iter().any(|e| e.eq_ignore_ascii_case(wanted)))
            .map(|(format, _)| *format)
            .ok_or_else(|| {
                ImgtagError::UnsupportedFormat(format!(
                    "'{ext}' (supported: .jpg, .png, .gif, .tif, .bmp, .pdf, .webp, .html, .b64)"
                ))
            })
    }

    /// Detects the format from a file name's extension.
    pub fn from_path(path: &Path) -> Result<Self, ImgtagError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ImgtagError::UnsupportedFormat(format!("'{}' has no extension", path.display()))
            })?;
        Self::from_extension(ext)
    }

    /// The canonical extension, without a dot.
    pub fn extension(self) -> &'static str {
        FORMAT_EXTENSIONS
            .iter()
            .find(|(format, _)| *format == self)
            .map(|(_, exts)| exts[0])
            .unwrap_or("bin")
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Pdf => "application/pdf",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Html => "text/html",
            ImageFormat::Base64 => "text/plain",
        }
    }

    /// True for formats that carry EXIF or XMP worth extracting.
    pub fn carries_metadata(self) -> bool {
        matches!(
            self,
            ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Tiff | ImageFormat::Webp
        )
    }
}

/// True when `name` has an extension imgtag recognizes.
pub fn is_valid_format(name: impl AsRef<Path>) -> bool {
    ImageFormat::from_path(name.as_ref()).is_ok()
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = ImgtagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s)
    }
}
