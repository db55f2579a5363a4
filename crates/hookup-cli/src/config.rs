//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments, which the handlers apply on top

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use hookup_core::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How schemas are resolved
    pub resolver: ResolverConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, json-pretty, yaml)
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,

    /// Include thread IDs
    pub thread_ids: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "Loaded configuration");
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to load config");
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("hookup.yaml"), PathBuf::from("hookup.json")];

        if let Some(config_dir) = dirs::config_dir() {
            let hookup_dir = config_dir.join("hookup");
            paths.push(hookup_dir.join("config.yaml"));
            paths.push(hookup_dir.join("config.json"));
        }

        paths
    }

    /// The configured output format
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_name(&self.output.format).ok_or_else(|| {
            Error::config(format!("unknown output format '{}'", self.output.format))
        })
    }
}

/// True for `.yaml` and `.yml` files
pub fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookup_core::MissingValue;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.resolver, ResolverConfig::default());
        assert_eq!(config.output_format().unwrap(), OutputFormat::Human);
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "resolver:\n  missing: omit\noutput:\n  format: json-pretty\nlogging:\n  level: debug"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.resolver.missing, MissingValue::Omit);
        assert!(config.resolver.unwrap_field_values);
        assert_eq!(config.output_format().unwrap(), OutputFormat::JsonPretty);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"resolver": {{"unwrap_field_values": false}}}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(!config.resolver.unwrap_field_values);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = Config::load_with_file(Some(Path::new("/nonexistent/hookup.yaml"))).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_unknown_output_format() {
        let mut config = Config::default();
        config.output.format = "xml".to_string();
        assert!(matches!(config.output_format(), Err(Error::Config(_))));
    }
}
