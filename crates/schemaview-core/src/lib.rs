//! Schemaview Core - schema normalization and example generation
//!
//! This crate prepares JSON-Schema-like documents for documentation panels:
//! - **SchemaNormalizer**: turns raw schemas, or plain JSON such as binding
//!   maps, into a uniform [`NormalizedSchema`] tree
//! - **ExampleGenerator**: produces one representative JSON value for a
//!   normalized tree when the author supplied none
//!
//! ## Features
//!
//! - **Composition**: `allOf`/`oneOf`/`anyOf` kept as labelled variant groups,
//!   with `allOf` members also merged into one object for property display
//! - **Cycle Safety**: self-referencing schemas end in placeholders instead of
//!   unrolling forever
//! - **Depth Ceiling**: pathologically nested input degrades to placeholders
//! - **Configurable Fallbacks**: per-kind fallback literals loaded from YAML or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use schemaview_core::{generate_example, normalize};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {
//!         "id": {"type": "integer"},
//!         "name": {"type": "string"}
//!     },
//!     "required": ["id"]
//! });
//!
//! let tree = normalize(&schema);
//! assert!(tree.is_required("id"));
//!
//! let example = generate_example(&tree);
//! assert_eq!(example, json!({"id": 0, "name": "example_name"}));
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod adapters;
pub mod config;
pub mod error;
pub mod example;
pub mod message;
pub mod normalize;
pub mod seen;

/// Prefix of the bookkeeping extensions a document parser injects
pub const PARSER_EXTENSION_PREFIX: &str = "x-parser-";

// Re-export commonly used types for convenience
pub use adapters::PARAMETER_LOCATION_EXTENSION;
pub use config::{ExampleConfig, Fallbacks, NormalizerConfig};
pub use error::{Error, Result};
pub use example::{render_example, ExampleGenerator};
pub use message::{
    message_examples, sanitize_example, ExampleSet, MessageExampleResolver, MessagePart,
};
pub use normalize::{
    NamedExample, NormalizedSchema, SchemaKind, SchemaNormalizer, Variant, VariantSource,
};
pub use seen::{Revisit, Seen};

/// Normalize a schema or plain JSON value with the default configuration
pub fn normalize(raw: &serde_json::Value) -> NormalizedSchema {
    SchemaNormalizer::new().normalize(raw)
}

/// Generate an example for a normalized tree with the default configuration
pub fn generate_example(schema: &NormalizedSchema) -> serde_json::Value {
    ExampleGenerator::new().generate(schema)
}
