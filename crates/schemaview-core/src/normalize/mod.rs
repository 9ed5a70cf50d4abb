//! Schema normalization
//!
//! This module turns raw schemas into a uniform tree for progressive display:
//! - Composition keywords become tagged variant lists
//! - `allOf` members are additionally merged into one synthetic object
//! - Plain JSON (binding maps, parameter values) gets an inferred schema
//! - Circular references become terminal placeholders
//!
//! # Example Usage
//!
//! ```rust
//! use schemaview_core::normalize::{SchemaKind, SchemaNormalizer};
//! use serde_json::json;
//!
//! let normalizer = SchemaNormalizer::new();
//! let tree = normalizer.normalize(&json!({
//!     "type": "object",
//!     "properties": {"id": {"type": "integer"}}
//! }));
//! assert_eq!(tree.properties["id"].kind, SchemaKind::Integer);
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

mod infer;
pub mod normalizer;
mod raw;
pub mod types;

pub use normalizer::{looks_like_schema, merge_all_of, SchemaNormalizer};
pub use types::{NamedExample, NormalizedSchema, SchemaKind, Variant, VariantSource};
