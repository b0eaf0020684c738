//! Error types for the tcpostman core library
//!
//! Schema-level problems (unresolved references, cycles, malformed nodes)
//! never surface here; the engines degrade to placeholders. What remains
//! is loading, serialization and option validation.

use tcpostman_schemas::LoaderError;
use thiserror::Error;

/// Main error type for collection generation
#[derive(Error, Debug)]
pub enum Error {
    /// The structure document could not be loaded
    #[error("Failed to load structure: {source}")]
    Loader {
        #[from]
        source: LoaderError,
    },

    /// JSON serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid generation options
    #[error("Configuration error: {message}")]
    Configuration { message: String, field: Option<String> },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn configuration(message: impl Into<String>, field: Option<&str>) -> Self {
        Error::Configuration {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
