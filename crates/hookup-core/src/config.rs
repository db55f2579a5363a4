//! Resolver configuration
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// What to emit for a field whose source path does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingValue {
    /// Write `null` under the field name
    #[default]
    Null,
    /// Leave the field out of the target
    Omit,
}

/// Knobs for [`SchemaResolver`](crate::SchemaResolver)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Applies to path accessors and selectors whose path is absent
    pub missing: MissingValue,

    /// Strip a `{ "value": V }` wrapper before a selector transforms and
    /// validates its value
    pub unwrap_field_values: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            missing: MissingValue::Null,
            unwrap_field_values: true,
        }
    }
}

impl ResolverConfig {
    pub fn omit_missing(mut self) -> Self {
        self.missing = MissingValue::Omit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.missing, MissingValue::Null);
        assert!(config.unwrap_field_values);
    }

    #[test]
    fn test_partial_deserialize() {
        let config: ResolverConfig = serde_json::from_value(json!({"missing": "omit"})).unwrap();
        assert_eq!(config.missing, MissingValue::Omit);
        assert!(config.unwrap_field_values);

        let config: ResolverConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let result: std::result::Result<ResolverConfig, _> =
            serde_json::from_value(json!({"missing": "skip"}));
        assert!(result.is_err());
    }
}
