//! Output format selection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use super::{io_json, io_yaml};
use crate::error::ImgtagError;

/// Structured-text format records are written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// File extension including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Yaml => ".yaml",
            OutputFormat::Json => ".json",
        }
    }

    /// Picks the format from an output path's extension, if it names one.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Writes `value` to `path` in this format.
    pub fn write<T: Serialize + ?Sized>(self, path: &Path, value: &T) -> Result<(), ImgtagError> {
        match self {
            OutputFormat::Yaml => io_yaml::write_yaml(path, value),
            OutputFormat::Json => io_json::write_json(path, value),
        }
    }

    /// Renders `value` to a string in this format.
    pub fn render<T: Serialize + ?Sized>(self, value: &T) -> Result<String, ImgtagError> {
        match self {
            OutputFormat::Yaml => {
                io_yaml::to_yaml_string(value).map_err(|source| ImgtagError::YamlWrite {
                    path: "<stdout>".into(),
                    source,
                })
            }
            OutputFormat::Json => {
                io_json::to_json_string(value).map_err(|source| ImgtagError::JsonWrite {
                    path: "<stdout>".into(),
                    source,
                })
            }
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ImgtagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(ImgtagError::UnsupportedFormat(format!(
                "'{other}' (supported: yaml, json)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_path_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.yml")), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_path(Path::new("out.JSON")), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_path(Path::new("out")), None);
        assert_eq!(OutputFormat::from_path(Path::new("out.txt")), None);
    }

    #[test]
    fn parse_names() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("toml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().extension(), ".yaml");
    }
}
