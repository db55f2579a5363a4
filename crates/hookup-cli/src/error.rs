//! Error types and handling for the CLI
//!
//! Each variant maps to a distinct process exit code so scripts can tell a
//! broken schema from a missing file or from data that failed validation.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Schema construction error from hookup-core
    #[error("Schema error: {0}")]
    Schema(#[from] hookup_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A document that does not parse in the format its extension implies
    #[error("Invalid file format for {}: expected {}: {}", path.display(), expected, message)]
    InvalidFormat {
        path: PathBuf,
        expected: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mapped output with invalid fields under `--strict`
    #[error("{invalid} of {total} mapped document(s) failed validation")]
    ValidationFailed { invalid: usize, total: usize },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Schema(_) => 2,
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::ValidationFailed { .. } => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            Error::Io(io::Error::new(io::ErrorKind::Other, "boom")),
            Error::Schema(hookup_core::Error::DuplicateField {
                key: "name".to_string(),
            }),
            Error::FileNotFound {
                path: PathBuf::from("missing.json"),
            },
            Error::config("bad"),
            Error::ValidationFailed { invalid: 1, total: 2 },
            Error::other("misc"),
        ];
        let mut codes: Vec<i32> = errors.iter().map(Error::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_schema_error_names_key() {
        let err = Error::from(hookup_core::Error::UnknownValidator {
            key: "age".to_string(),
            name: "adult".to_string(),
        });
        let message = format_error(&err, false);
        assert!(message.starts_with("Error: Schema error:"));
        assert!(message.contains("'age'"));
    }

    #[test]
    fn test_validation_failed_message() {
        let err = Error::ValidationFailed { invalid: 2, total: 3 };
        assert_eq!(err.to_string(), "2 of 3 mapped document(s) failed validation");
    }
}
