//! Error types for configuration loading and example rendering
//!
//! Normalization and example generation never fail; they degrade to `unknown`
//! nodes and sentinel values. The errors here cover the edges around them.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type for fallible schemaview operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading configuration or rendering output
#[derive(Error, Debug)]
pub enum Error {
    /// YAML configuration could not be parsed
    #[error("Failed to parse YAML configuration: {source}")]
    YamlConfig {
        #[from]
        source: serde_yaml::Error,
    },

    /// JSON configuration could not be parsed, or a value could not be serialized
    #[error("JSON processing failed: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Configuration parsed but holds unusable values
    #[error("Invalid configuration field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl Error {
    /// Create an invalid configuration error
    pub fn invalid_config<F, R>(field: F, reason: R) -> Self
    where
        F: Into<String>,
        R: Into<String>,
    {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
