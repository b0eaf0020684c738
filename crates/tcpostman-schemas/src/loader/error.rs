//! Error types for structure loading
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Failures while turning a file on disk into a schema tree
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The text contains no balanced `{...}` object
    #[error("No root JSON object found in '{path}'")]
    NoRootObject { path: PathBuf },

    /// JSON parsing errors, reported after the lenient fallback also failed
    #[error("Failed to parse JSON in '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// The document parsed but its root is not an object
    #[error("Root of '{path}' must be an object, found {found}")]
    InvalidRoot { path: PathBuf, found: String },
}

impl LoaderError {
    /// Create an I/O error
    pub fn io_error(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn no_root_object(path: impl AsRef<Path>) -> Self {
        Self::NoRootObject {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a JSON parse error
    pub fn json_parse_error(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::JsonParseError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a YAML parse error
    pub fn yaml_parse_error(path: impl AsRef<Path>, source: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn invalid_root(path: impl AsRef<Path>, found: impl Into<String>) -> Self {
        Self::InvalidRoot {
            path: path.as_ref().to_path_buf(),
            found: found.into(),
        }
    }

    /// The file this error refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::IoError { path, .. }
            | Self::NoRootObject { path }
            | Self::JsonParseError { path, .. }
            | Self::YamlParseError { path, .. }
            | Self::InvalidRoot { path, .. } => path,
        }
    }

    /// Line of the parse failure, when the parser reported one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::JsonParseError { source, .. } => Some(source.line()),
            Self::YamlParseError { source, .. } => source.location().map(|loc| loc.line()),
            _ => None,
        }
    }
}
