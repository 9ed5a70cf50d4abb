//! Schema inference for plain JSON
//!
//! Binding maps and similar free-form objects carry data, not schema
//! vocabulary. Their schema is read off the data itself, and scalar values
//! are kept as `const` so examples generated from the inferred schema
//! reproduce the original data. Nested values that are already schemas
//! (bindings embed them for fields like a kafka `groupId`) are normalized
//! as schemas instead.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::normalize::normalizer::{looks_like_schema, normalize_node};
use crate::normalize::types::{NormalizedSchema, SchemaKind};
use crate::seen::{identity, Revisit, Seen};
use serde_json::Value;
use tracing::warn;

pub(crate) fn infer(value: &Value, seen: &mut Seen) -> NormalizedSchema {
    match seen.enter(identity(value)) {
        Ok(()) => {}
        Err(Revisit::Cycle) => return NormalizedSchema::circular_placeholder(),
        Err(Revisit::DepthExceeded) => {
            warn!(max_depth = seen.max_depth(), "plain JSON nesting too deep, truncating");
            return NormalizedSchema::truncated_placeholder();
        }
    }

    let node = match value {
        Value::Object(map) => {
            let mut node = NormalizedSchema::new(SchemaKind::Object);
            for (name, child) in map {
                node.properties.insert(name.clone(), child_node(child, seen));
            }
            node
        }
        Value::Array(elements) => {
            let mut node = NormalizedSchema::new(SchemaKind::Array);
            let items = match elements.first() {
                Some(first) => child_node(first, seen),
                None => NormalizedSchema::unknown(),
            };
            node.items = Some(Box::new(items));
            node
        }
        scalar => {
            let mut node = NormalizedSchema::new(SchemaKind::of_value(scalar));
            node.constraints.insert("const".to_string(), scalar.clone());
            node
        }
    };

    seen.leave();
    node
}

fn child_node(value: &Value, seen: &mut Seen) -> NormalizedSchema {
    if looks_like_schema(value) {
        normalize_node(value, value, seen)
    } else {
        infer(value, seen)
    }
}
