//! Normalized schema tree types
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Closed set of node kinds every consumer dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Composed,
    Unknown,
}

impl SchemaKind {
    /// Map a JSON Schema `type` name onto a kind.
    ///
    /// Only the seven JSON Schema primitive names are accepted; `composed` and
    /// `unknown` are internal kinds and never appear in source documents.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            _ => None,
        }
    }

    /// Kind of a concrete JSON value
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Composed => "composed",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this kind can be written as a JSON Schema `type` name
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Composed | Self::Unknown)
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a variant of a composed node came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariantSource {
    /// One entry of a `type: [..]` union
    Type,
    /// Synthetic object unioning the properties of every `allOf` member
    AllOfMerged,
    AllOf,
    OneOf,
    AnyOf,
}

impl VariantSource {
    /// Label shown next to a variant group
    pub fn label(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::AllOfMerged | Self::AllOf => "all of",
            Self::OneOf => "one of",
            Self::AnyOf => "any of",
        }
    }

    /// Source keyword, `None` for variants that have no keyword of their own
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::AllOf => Some("allOf"),
            Self::OneOf => Some("oneOf"),
            Self::AnyOf => Some("anyOf"),
            Self::Type | Self::AllOfMerged => None,
        }
    }
}

/// A child of a composed node, tagged with its source keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub source: VariantSource,
    pub schema: NormalizedSchema,
}

impl Variant {
    pub fn new(source: VariantSource, schema: NormalizedSchema) -> Self {
        Self { source, schema }
    }
}

/// Author-supplied example, optionally named and summarized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedExample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub value: Value,
}

impl NamedExample {
    /// Anonymous example wrapping a bare value
    pub fn new(value: Value) -> Self {
        Self {
            name: None,
            summary: None,
            value,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    /// Heading used when listing examples, e.g. `#2 Example - Signup`
    pub fn heading(&self, index: usize) -> String {
        match self.name {
            Some(ref name) => format!("#{} Example - {}", index + 1, name),
            None => format!("#{} Example", index + 1),
        }
    }
}

/// Uniform internal representation of an arbitrary input schema.
///
/// Every node is owned by its parent; nothing is shared. Children of a
/// cycle in the source document show up as placeholders with
/// [`circular`](Self::circular) set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSchema {
    pub kind: SchemaKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// Declaration order is display order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, NormalizedSchema>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub required_properties: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<NormalizedSchema>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,

    /// Validation keywords kept verbatim for display
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub constraints: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<NamedExample>,

    /// `x-*` specification extensions
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,

    /// Set on the placeholder substituted for a revisited source node
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub circular: bool,

    /// Set on the placeholder substituted when the depth ceiling is reached
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

impl NormalizedSchema {
    /// Empty node of the given kind
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            title: None,
            description: None,
            deprecated: None,
            properties: IndexMap::new(),
            required_properties: BTreeSet::new(),
            items: None,
            variants: Vec::new(),
            constraints: Map::new(),
            examples: Vec::new(),
            extensions: Map::new(),
            circular: false,
            truncated: false,
        }
    }

    pub fn unknown() -> Self {
        Self::new(SchemaKind::Unknown)
    }

    /// Terminal node standing in for a source node already on the active path
    pub fn circular_placeholder() -> Self {
        Self {
            circular: true,
            ..Self::unknown()
        }
    }

    /// Terminal node standing in for a subtree deeper than the configured ceiling
    pub fn truncated_placeholder() -> Self {
        Self {
            truncated: true,
            ..Self::unknown()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.circular || self.truncated
    }

    pub fn constraint(&self, keyword: &str) -> Option<&Value> {
        self.constraints.get(keyword)
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required_properties.contains(property)
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false)
    }

    /// Variants coming from one source keyword, in declaration order
    pub fn variants_from(&self, source: VariantSource) -> impl Iterator<Item = &NormalizedSchema> {
        self.variants
            .iter()
            .filter(move |v| v.source == source)
            .map(|v| &v.schema)
    }

    /// The synthetic `allOf` object, if this node has one
    pub fn merged_all_of(&self) -> Option<&NormalizedSchema> {
        self.variants_from(VariantSource::AllOfMerged).next()
    }

    /// The single `type` declared beside composition keywords, if any.
    /// Unions of several types return `None`.
    pub fn declared_type(&self) -> Option<&NormalizedSchema> {
        let mut arms = self.variants_from(VariantSource::Type);
        match (arms.next(), arms.next()) {
            (Some(arm), None) => Some(arm),
            _ => None,
        }
    }

    /// Extensions minus the bookkeeping keys injected by the document parser
    pub fn visible_extensions(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.extensions
            .iter()
            .filter(|(key, _)| !key.starts_with(crate::PARSER_EXTENSION_PREFIX))
    }

    /// True when the node says nothing a generator could build an example from
    pub fn is_shapeless(&self) -> bool {
        self.kind == SchemaKind::Unknown
            && !self.is_placeholder()
            && self.examples.is_empty()
            && !["const", "enum", "default"]
                .iter()
                .any(|k| self.constraints.contains_key(*k))
    }
}

impl Default for NormalizedSchema {
    fn default() -> Self {
        Self::unknown()
    }
}
