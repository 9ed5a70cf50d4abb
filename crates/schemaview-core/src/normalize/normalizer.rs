//! Schema normalization
//!
//! Converts JSON-Schema-like documents into [`NormalizedSchema`] trees.
//! Local `$ref` pointers are followed against the root document; following
//! them is the only way a source document can lead back into a node that is
//! already being normalized, and those re-entries become placeholders.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::config::NormalizerConfig;
use crate::normalize::infer;
use crate::normalize::types::{NamedExample, NormalizedSchema, SchemaKind, Variant, VariantSource};
use crate::seen::{identity, Revisit, Seen};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Keywords that shape the tree; everything else is kept as a constraint
const STRUCTURAL_KEYWORDS: &[&str] = &[
    "type",
    "properties",
    "required",
    "items",
    "allOf",
    "oneOf",
    "anyOf",
    "title",
    "description",
    "deprecated",
    "examples",
    "example",
];

const COMPOSITION_KEYWORDS: [(&str, VariantSource); 3] = [
    ("allOf", VariantSource::AllOf),
    ("oneOf", VariantSource::OneOf),
    ("anyOf", VariantSource::AnyOf),
];

/// Keys whose presence marks an object as schema-shaped
const SCHEMA_MARKERS: &[&str] = &[
    "properties", "items", "allOf", "oneOf", "anyOf", "$ref", "enum", "const", "default",
    "examples",
];

/// Keys a schema may carry without saying anything about its shape
const ANNOTATION_KEYWORDS: &[&str] = &["title", "description", "$schema", "$id", "$comment"];

const NUMERIC_KEYWORDS: &[&str] = &[
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "multipleOf",
];

const STRING_KEYWORDS: &[&str] = &["minLength", "maxLength", "pattern", "format"];

/// Whether `value` uses schema vocabulary rather than being plain data
pub fn looks_like_schema(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    if SCHEMA_MARKERS
        .iter()
        .chain(NUMERIC_KEYWORDS)
        .chain(STRING_KEYWORDS)
        .any(|k| obj.contains_key(*k))
    {
        return true;
    }

    // a schema that only annotates, e.g. `{"description": ".."}`
    if !obj.is_empty() && obj.keys().all(|k| ANNOTATION_KEYWORDS.contains(&k.as_str())) {
        return true;
    }

    match obj.get("type") {
        Some(Value::String(name)) => SchemaKind::from_type_name(name).is_some(),
        Some(Value::Array(names)) => {
            !names.is_empty()
                && names
                    .iter()
                    .all(|n| n.as_str().and_then(SchemaKind::from_type_name).is_some())
        }
        _ => false,
    }
}

/// Converts raw schemas and plain JSON into normalized trees
#[derive(Debug, Clone, Default)]
pub struct SchemaNormalizer {
    config: NormalizerConfig,
}

impl SchemaNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize `raw`, deciding from its shape whether it is a schema or
    /// plain data that needs a schema inferred for it
    pub fn normalize(&self, raw: &Value) -> NormalizedSchema {
        let empty_object = raw.as_object().is_some_and(Map::is_empty);
        if empty_object || looks_like_schema(raw) {
            self.normalize_schema(raw)
        } else {
            self.normalize_json(raw)
        }
    }

    /// Normalize `raw` as a schema that is its own root document
    pub fn normalize_schema(&self, raw: &Value) -> NormalizedSchema {
        self.normalize_in(raw, raw)
    }

    /// Normalize a schema node living inside `root`, against which local
    /// `$ref` pointers are resolved
    pub fn normalize_in(&self, node: &Value, root: &Value) -> NormalizedSchema {
        let mut seen = self.new_seen();
        self.normalize_with(node, root, &mut seen)
    }

    /// Normalize with a caller-owned active path
    pub fn normalize_with(&self, node: &Value, root: &Value, seen: &mut Seen) -> NormalizedSchema {
        normalize_node(node, root, seen)
    }

    /// Infer a schema for plain data such as a binding map
    pub fn normalize_json(&self, raw: &Value) -> NormalizedSchema {
        let mut seen = self.new_seen();
        infer::infer(raw, &mut seen)
    }

    fn new_seen(&self) -> Seen {
        Seen::new(self.config.max_depth)
    }
}

/// Normalize one schema node on an existing active path
pub(crate) fn normalize_node(node: &Value, root: &Value, seen: &mut Seen) -> NormalizedSchema {
    Walk { root, seen }.node(node)
}

/// Outcome of following `$ref` pointers from a node
enum Resolved<'a> {
    Node(&'a Value),
    Cycle,
    Unresolved(String),
}

struct Walk<'a, 's> {
    root: &'a Value,
    seen: &'s mut Seen,
}

impl<'a> Walk<'a, '_> {
    fn node(&mut self, raw: &'a Value) -> NormalizedSchema {
        let target = match self.resolve(raw) {
            Resolved::Node(target) => target,
            Resolved::Cycle => {
                debug!("reference chain loops back on itself");
                return NormalizedSchema::circular_placeholder();
            }
            Resolved::Unresolved(reference) => {
                warn!(reference = %reference, "unresolvable schema reference");
                let mut node = NormalizedSchema::unknown();
                node.constraints.insert("$ref".to_string(), Value::String(reference));
                return node;
            }
        };

        match self.seen.enter(identity(target)) {
            Ok(()) => {}
            Err(Revisit::Cycle) => {
                debug!(depth = self.seen.depth(), "circular schema, substituting placeholder");
                return NormalizedSchema::circular_placeholder();
            }
            Err(Revisit::DepthExceeded) => {
                warn!(max_depth = self.seen.max_depth(), "schema nesting too deep, truncating");
                return NormalizedSchema::truncated_placeholder();
            }
        }

        let normalized = self.body(target, None);
        self.seen.leave();
        normalized
    }

    /// Follow local `$ref` pointers until reaching a non-reference node
    fn resolve(&self, raw: &'a Value) -> Resolved<'a> {
        let mut current = raw;
        let mut visited: Vec<usize> = Vec::new();

        while let Some(reference) = current.get("$ref").and_then(Value::as_str) {
            let id = identity(current);
            if visited.contains(&id) {
                return Resolved::Cycle;
            }
            visited.push(id);

            let Some(pointer) = reference.strip_prefix('#') else {
                return Resolved::Unresolved(reference.to_string());
            };
            match self.root.pointer(pointer) {
                Some(target) => {
                    debug!(reference, "following local reference");
                    current = target;
                }
                None => return Resolved::Unresolved(reference.to_string()),
            }
        }

        Resolved::Node(current)
    }

    /// Build the node for `value`. With `kind_override` set this builds one
    /// arm of a `type: [..]` union and skips composition.
    fn body(&mut self, value: &'a Value, kind_override: Option<SchemaKind>) -> NormalizedSchema {
        let Some(obj) = value.as_object() else {
            return NormalizedSchema::unknown();
        };

        let types = declared_types(obj);
        let composed = COMPOSITION_KEYWORDS
            .iter()
            .any(|(keyword, _)| composition_members(obj, keyword).is_some());

        let kind = match kind_override {
            Some(kind) => kind,
            None if types.len() > 1 || composed => SchemaKind::Composed,
            None => types.first().copied().unwrap_or_else(|| infer_kind(obj)),
        };

        let mut node = NormalizedSchema::new(kind);
        node.constraints = constraints(obj);

        if kind_override.is_none() {
            node.title = obj.get("title").and_then(Value::as_str).map(String::from);
            node.description = obj.get("description").and_then(Value::as_str).map(String::from);
            node.deprecated = obj.get("deprecated").and_then(Value::as_bool);
            node.examples = examples(obj);
            node.extensions = extensions(obj);
        }

        // A union's own structure lives on its type arms
        let owns_structure = match kind {
            SchemaKind::Object | SchemaKind::Array => true,
            SchemaKind::Composed => types.len() <= 1,
            _ => false,
        };

        if owns_structure {
            if kind != SchemaKind::Array {
                self.properties(obj, &mut node);
            }
            if kind != SchemaKind::Object {
                node.items = self.items(obj);
            }
        }

        if kind_override.is_none() {
            match types.as_slice() {
                [declared] if kind == SchemaKind::Composed => {
                    // structure stays on the node, the arm only records the type
                    let mut arm = NormalizedSchema::new(*declared);
                    arm.constraints = node.constraints.clone();
                    node.variants.push(Variant::new(VariantSource::Type, arm));
                }
                [_, _, ..] => {
                    for ty in &types {
                        let arm = self.body(value, Some(*ty));
                        node.variants.push(Variant::new(VariantSource::Type, arm));
                    }
                }
                _ => {}
            }
            for (keyword, source) in COMPOSITION_KEYWORDS {
                self.composition(obj, keyword, source, &mut node);
            }
        }

        node
    }

    fn properties(&mut self, obj: &'a Map<String, Value>, node: &mut NormalizedSchema) {
        if let Some(props) = obj.get("properties").and_then(Value::as_object) {
            for (name, child) in props {
                let child = self.node(child);
                node.properties.insert(name.clone(), child);
            }
        }

        if let Some(required) = obj.get("required").and_then(Value::as_array) {
            node.required_properties
                .extend(required.iter().filter_map(Value::as_str).map(String::from));
        }
    }

    fn items(&mut self, obj: &'a Map<String, Value>) -> Option<Box<NormalizedSchema>> {
        let items = match obj.get("items")? {
            // tuple form: the first position stands for the sequence
            Value::Array(positions) => positions.first()?,
            single => single,
        };
        Some(Box::new(self.node(items)))
    }

    fn composition(
        &mut self,
        obj: &'a Map<String, Value>,
        keyword: &str,
        source: VariantSource,
        node: &mut NormalizedSchema,
    ) {
        let Some(members) = composition_members(obj, keyword) else {
            return;
        };

        let members: Vec<NormalizedSchema> = members.iter().map(|m| self.node(m)).collect();

        // nothing to merge when no member declares properties
        if source == VariantSource::AllOf {
            let merged = merge_all_of(&members);
            if !merged.properties.is_empty() || !merged.required_properties.is_empty() {
                node.variants.push(Variant::new(VariantSource::AllOfMerged, merged));
            }
        }
        node.variants
            .extend(members.into_iter().map(|m| Variant::new(source, m)));
    }
}

/// Union the properties of `allOf` members into one object; on a name
/// collision the later member's schema wins
pub fn merge_all_of(members: &[NormalizedSchema]) -> NormalizedSchema {
    let mut merged = NormalizedSchema::new(SchemaKind::Object);
    for member in members {
        absorb(&mut merged, member);
    }
    merged
}

fn absorb(merged: &mut NormalizedSchema, member: &NormalizedSchema) {
    for (name, schema) in &member.properties {
        merged.properties.insert(name.clone(), schema.clone());
    }
    merged
        .required_properties
        .extend(member.required_properties.iter().cloned());

    if let Some(nested) = member.merged_all_of() {
        absorb(merged, nested);
    }
}

/// One hop through a local `$ref`, or `value` itself when there is none
pub(crate) fn follow_local_ref<'a>(value: &'a Value, root: &'a Value) -> &'a Value {
    value
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|reference| reference.strip_prefix('#'))
        .and_then(|pointer| root.pointer(pointer))
        .unwrap_or(value)
}

fn declared_types(obj: &Map<String, Value>) -> Vec<SchemaKind> {
    let mut types = Vec::new();
    match obj.get("type") {
        Some(Value::String(name)) => types.extend(SchemaKind::from_type_name(name)),
        Some(Value::Array(names)) => {
            for kind in names.iter().filter_map(Value::as_str).filter_map(SchemaKind::from_type_name) {
                if !types.contains(&kind) {
                    types.push(kind);
                }
            }
        }
        _ => {}
    }
    types
}

fn composition_members<'v>(obj: &'v Map<String, Value>, keyword: &str) -> Option<&'v Vec<Value>> {
    obj.get(keyword)
        .and_then(Value::as_array)
        .filter(|members| !members.is_empty())
}

/// Kind for a schema without a usable `type`
fn infer_kind(obj: &Map<String, Value>) -> SchemaKind {
    let has = |keys: &[&str]| keys.iter().any(|k| obj.contains_key(*k));

    if has(&["properties", "required", "additionalProperties"]) {
        SchemaKind::Object
    } else if obj.contains_key("items") {
        SchemaKind::Array
    } else if has(NUMERIC_KEYWORDS) {
        SchemaKind::Number
    } else if has(STRING_KEYWORDS) {
        SchemaKind::String
    } else if let Some(value) = obj.get("const") {
        SchemaKind::of_value(value)
    } else if let Some(first) = obj.get("enum").and_then(Value::as_array).and_then(|e| e.first()) {
        SchemaKind::of_value(first)
    } else {
        SchemaKind::Unknown
    }
}

fn constraints(obj: &Map<String, Value>) -> Map<String, Value> {
    obj.iter()
        .filter(|(key, _)| !STRUCTURAL_KEYWORDS.contains(&key.as_str()) && !key.starts_with("x-"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn extensions(obj: &Map<String, Value>) -> Map<String, Value> {
    obj.iter()
        .filter(|(key, _)| key.starts_with("x-"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn examples(obj: &Map<String, Value>) -> Vec<NamedExample> {
    match obj.get("examples") {
        Some(Value::Array(values)) => values.iter().cloned().map(NamedExample::new).collect(),
        Some(single) => vec![NamedExample::new(single.clone())],
        None => obj
            .get("example")
            .map(|ex| vec![NamedExample::new(ex.clone())])
            .unwrap_or_default(),
    }
}
