//! Example value generation
//!
//! Resolution order per node, first match wins: `const`, first `enum` value,
//! first author example, `default`, then a value synthesized from the kind.
//! Composed nodes are represented by their first variant only; variants are
//! not explored exhaustively.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::config::ExampleConfig;
use crate::example::formats::format_example;
use crate::normalize::{NormalizedSchema, SchemaKind, VariantSource};
use crate::seen::{identity, Revisit, Seen};
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

/// Produces one representative value per normalized schema
#[derive(Debug, Clone, Default)]
pub struct ExampleGenerator {
    config: ExampleConfig,
}

impl ExampleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExampleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExampleConfig {
        &self.config
    }

    /// Generate an example for `schema`
    pub fn generate(&self, schema: &NormalizedSchema) -> Value {
        let mut seen = Seen::new(self.config.max_depth);
        self.generate_with(schema, &mut seen)
    }

    /// Generate with a caller-owned active path
    pub fn generate_with(&self, schema: &NormalizedSchema, seen: &mut Seen) -> Value {
        self.node(schema, schema.title.as_deref(), seen)
    }

    fn sentinel(&self) -> Value {
        self.config.fallbacks.get(SchemaKind::Unknown)
    }

    fn node(&self, schema: &NormalizedSchema, name: Option<&str>, seen: &mut Seen) -> Value {
        if schema.is_placeholder() {
            return self.sentinel();
        }

        match seen.enter(identity(schema)) {
            Ok(()) => {}
            Err(Revisit::Cycle) => {
                debug!("schema revisited during generation, using sentinel");
                return self.sentinel();
            }
            Err(Revisit::DepthExceeded) => {
                warn!(max_depth = seen.max_depth(), "example nesting too deep, using sentinel");
                return self.sentinel();
            }
        }

        let value = self
            .declared(schema)
            .unwrap_or_else(|| self.synthesize(schema, name, seen));
        seen.leave();
        value
    }

    /// Author-declared value, if any
    fn declared(&self, schema: &NormalizedSchema) -> Option<Value> {
        if let Some(value) = schema.constraint("const") {
            return Some(value.clone());
        }
        if let Some(first) = schema
            .constraint("enum")
            .and_then(Value::as_array)
            .and_then(|values| values.first())
        {
            return Some(first.clone());
        }
        if let Some(example) = schema.examples.first() {
            return Some(example.value.clone());
        }
        schema.constraint("default").cloned()
    }

    fn synthesize(&self, schema: &NormalizedSchema, name: Option<&str>, seen: &mut Seen) -> Value {
        match schema.kind {
            SchemaKind::Object => Value::Object(self.object(schema, seen)),
            SchemaKind::Array => self.array(schema, name, seen),
            SchemaKind::String => self.string(schema, name),
            SchemaKind::Number | SchemaKind::Integer => self.numeric(schema),
            SchemaKind::Boolean => self.config.fallbacks.get(SchemaKind::Boolean),
            SchemaKind::Null => Value::Null,
            SchemaKind::Composed => self.composed(schema, name, seen),
            SchemaKind::Unknown => self.sentinel(),
        }
    }

    fn object(&self, schema: &NormalizedSchema, seen: &mut Seen) -> Map<String, Value> {
        let mut obj = Map::new();
        for (key, property) in &schema.properties {
            if property.is_shapeless() {
                continue;
            }
            if property.is_deprecated() && !self.config.include_deprecated {
                continue;
            }
            obj.insert(key.clone(), self.node(property, Some(key.as_str()), seen));
        }
        obj
    }

    fn array(&self, schema: &NormalizedSchema, name: Option<&str>, seen: &mut Seen) -> Value {
        match schema.items.as_deref() {
            Some(items) if !items.is_shapeless() => Value::Array(vec![self.node(items, name, seen)]),
            _ => Value::Array(Vec::new()),
        }
    }

    fn string(&self, schema: &NormalizedSchema, name: Option<&str>) -> Value {
        if let Some(literal) = schema
            .constraint("format")
            .and_then(Value::as_str)
            .and_then(format_example)
        {
            return Value::String(literal.to_string());
        }

        match name {
            Some(name) if !name.is_empty() => Value::String(format!("example_{}", name)),
            _ => self.config.fallbacks.get(SchemaKind::String),
        }
    }

    fn numeric(&self, schema: &NormalizedSchema) -> Value {
        let integer = schema.kind == SchemaKind::Integer;
        let fallback = self.config.fallbacks.get(schema.kind);
        let bounds = Bounds::of(schema);

        if let Some((raw, lower, exclusive)) = bounds.lower {
            let candidate = match (integer, exclusive) {
                (true, true) => lower.floor() + 1.0,
                (true, false) => lower.ceil(),
                (false, true) => lower + 1.0,
                (false, false) => lower,
            };
            if bounds.admits(candidate) {
                if candidate == lower && !exclusive {
                    return raw.clone();
                }
                if let Some(value) = number_value(candidate, integer) {
                    return value;
                }
            }
            return fallback;
        }

        // Without a lower bound the fallback only yields to an upper bound it breaks
        if let (Some(upper), Some(current)) = (bounds.upper, fallback.as_f64()) {
            if !bounds.admits(current) {
                let candidate = if integer { upper.floor() } else { upper };
                if let Some(value) = number_value(candidate, integer) {
                    return value;
                }
            }
        }
        fallback
    }

    fn composed(&self, schema: &NormalizedSchema, name: Option<&str>, seen: &mut Seen) -> Value {
        // A single declared type decides the shape; only objects take entries from variants
        let declared = schema.declared_type();
        if let Some(arm) = declared {
            match arm.kind {
                SchemaKind::Object => {}
                SchemaKind::Array => return self.array(schema, name, seen),
                _ => return self.node(arm, name, seen),
            }
        }

        let mut own = self.object(schema, seen);

        let first = schema
            .variants
            .iter()
            .find(|variant| declared.is_none() || variant.source != VariantSource::Type);
        let Some(first) = first else {
            return if own.is_empty() {
                self.sentinel()
            } else {
                Value::Object(own)
            };
        };

        match self.node(&first.schema, name, seen) {
            Value::Object(entries) => {
                own.extend(entries);
                Value::Object(own)
            }
            other if own.is_empty() => other,
            _ => Value::Object(own),
        }
    }
}

/// Numeric bounds read from a node's constraints
struct Bounds<'a> {
    /// Raw keyword value, bound, and whether the bound is exclusive
    lower: Option<(&'a Value, f64, bool)>,
    upper: Option<f64>,
    upper_exclusive: bool,
}

impl<'a> Bounds<'a> {
    fn of(schema: &'a NormalizedSchema) -> Self {
        // draft 4 spells exclusivity as a boolean beside minimum/maximum
        let flag = |keyword: &str| schema.constraint(keyword).and_then(Value::as_bool).unwrap_or(false);
        let numeric = |keyword: &str| {
            schema
                .constraint(keyword)
                .and_then(|v| v.as_f64().map(|n| (v, n)))
        };

        let lower = match (numeric("exclusiveMinimum"), numeric("minimum")) {
            (Some((raw, n)), _) => Some((raw, n, true)),
            (None, Some((raw, n))) => Some((raw, n, flag("exclusiveMinimum"))),
            (None, None) => None,
        };
        let (upper, upper_exclusive) = match (numeric("exclusiveMaximum"), numeric("maximum")) {
            (Some((_, n)), _) => (Some(n), true),
            (None, Some((_, n))) => (Some(n), flag("exclusiveMaximum")),
            (None, None) => (None, false),
        };

        Self {
            lower,
            upper,
            upper_exclusive,
        }
    }

    fn admits(&self, candidate: f64) -> bool {
        if let Some((_, lower, exclusive)) = self.lower {
            if candidate < lower || (exclusive && candidate == lower) {
                return false;
            }
        }
        match self.upper {
            Some(upper) if self.upper_exclusive => candidate < upper,
            Some(upper) => candidate <= upper,
            None => true,
        }
    }
}

fn number_value(candidate: f64, integer: bool) -> Option<Value> {
    if !candidate.is_finite() {
        return None;
    }
    if integer && candidate.abs() < i64::MAX as f64 {
        return Some(Value::from(candidate as i64));
    }
    Number::from_f64(candidate).map(Value::Number)
}

/// Pretty-printed JSON for display
pub fn render_example(value: &Value) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
