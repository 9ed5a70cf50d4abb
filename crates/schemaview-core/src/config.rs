//! Configuration for normalization and example generation
//!
//! Both configurations have usable defaults and can be loaded from YAML or
//! JSON so rendering sites can override fallbacks without code changes.
//!
//! ```rust
//! use schemaview_core::ExampleConfig;
//!
//! let config = ExampleConfig::from_yaml_str("fallbacks:\n  string: placeholder\n")?;
//! assert_eq!(config.fallbacks.string, "placeholder");
//! # Ok::<(), schemaview_core::Error>(())
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::normalize::SchemaKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default ceiling for nested schema depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Normalizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Maximum nesting depth before a subtree is replaced by a placeholder
    pub max_depth: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl NormalizerConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_depth(self.max_depth)
    }
}

/// Fallback literal per kind, used when a node offers nothing better
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fallbacks {
    pub string: Value,
    pub number: Value,
    pub integer: Value,
    pub boolean: Value,
    /// Sentinel for `unknown` nodes and cycle placeholders
    pub unknown: Value,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            string: json!("string"),
            number: json!(0),
            integer: json!(0),
            boolean: json!(false),
            unknown: json!({}),
        }
    }
}

impl Fallbacks {
    /// Fallback for `kind`.
    ///
    /// Containers fall back to empty containers and `null` to null; composed
    /// nodes share the `unknown` sentinel.
    pub fn get(&self, kind: SchemaKind) -> Value {
        match kind {
            SchemaKind::String => self.string.clone(),
            SchemaKind::Number => self.number.clone(),
            SchemaKind::Integer => self.integer.clone(),
            SchemaKind::Boolean => self.boolean.clone(),
            SchemaKind::Null => Value::Null,
            SchemaKind::Object => Value::Object(Default::default()),
            SchemaKind::Array => Value::Array(Vec::new()),
            SchemaKind::Composed | SchemaKind::Unknown => self.unknown.clone(),
        }
    }
}

/// Example generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleConfig {
    pub fallbacks: Fallbacks,
    /// Maximum nesting depth before the sentinel is substituted
    pub max_depth: usize,
    /// Include deprecated properties in generated objects
    pub include_deprecated: bool,
}

impl Default for ExampleConfig {
    fn default() -> Self {
        Self {
            fallbacks: Fallbacks::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            include_deprecated: true,
        }
    }
}

impl ExampleConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_depth(self.max_depth)
    }
}

fn validate_depth(max_depth: usize) -> Result<()> {
    if max_depth == 0 {
        return Err(Error::invalid_config(
            "max_depth",
            "must be greater than zero",
        ));
    }
    Ok(())
}
