//! Shared utilities for command handlers

use crate::config::is_yaml;
use crate::error::{Error, Result};
use hookup_core::{Schema, TransformRegistry};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a JSON or YAML document, choosing the parser by file extension
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read document");

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
            message: e.to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
            message: e.to_string(),
        })
    }
}

/// Load a schema document and classify its fields
pub fn load_schema(path: &Path) -> Result<Schema> {
    let document = load_document(path)?;
    let schema = Schema::from_value_with(&document, &TransformRegistry::with_builtins())?;
    debug!(fields = schema.len(), "Schema loaded");
    Ok(schema)
}

/// Write `content` to `path`, creating parent directories
pub fn save_to(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}
