//! Error types for the Hookup core library
//!
//! Only configuration mistakes are errors. A field whose value fails its
//! validators is reported as data in the mapped output, never through this type.

use thiserror::Error;

/// Main error type for Hookup operations
#[derive(Error, Debug)]
pub enum Error {
    /// A schema entry whose shape is not one of the known accessor kinds
    #[error("Unsupported accessor for field '{key}': found {found}")]
    UnsupportedAccessor {
        key: String,
        found: String,
    },

    /// A selector entry that is missing required fields or carries bad ones
    #[error("Invalid selector for field '{key}': {message}")]
    InvalidSelector {
        key: String,
        message: String,
    },

    /// The same destination field was declared twice
    #[error("Duplicate field '{key}' in schema")]
    DuplicateField {
        key: String,
    },

    /// A declarative validator name that has no built-in counterpart
    #[error("Unknown validator '{name}' for field '{key}'")]
    UnknownValidator {
        key: String,
        name: String,
    },

    /// A declarative transform name missing from the registry
    #[error("Unknown transform '{name}' for field '{key}'")]
    UnknownTransform {
        key: String,
        name: String,
    },

    /// A pattern validator whose source does not compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The schema key this error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::UnsupportedAccessor { key, .. }
            | Error::InvalidSelector { key, .. }
            | Error::DuplicateField { key }
            | Error::UnknownValidator { key, .. }
            | Error::UnknownTransform { key, .. } => Some(key),
            Error::InvalidPattern { .. } | Error::Json { .. } => None,
        }
    }

    /// Prefix the key with the name of the nested schema it was found in
    pub(crate) fn nested_under(self, parent: &str) -> Self {
        let scope = |key: String| format!("{}.{}", parent, key);
        match self {
            Error::UnsupportedAccessor { key, found } => Error::UnsupportedAccessor {
                key: scope(key),
                found,
            },
            Error::InvalidSelector { key, message } => Error::InvalidSelector {
                key: scope(key),
                message,
            },
            Error::DuplicateField { key } => Error::DuplicateField { key: scope(key) },
            Error::UnknownValidator { key, name } => Error::UnknownValidator {
                key: scope(key),
                name,
            },
            Error::UnknownTransform { key, name } => Error::UnknownTransform {
                key: scope(key),
                name,
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json {
            message: source.to_string(),
            source,
        }
    }
}
