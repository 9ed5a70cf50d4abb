//! Conversion of normalized trees back to JSON Schema vocabulary
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::normalize::types::{NormalizedSchema, SchemaKind, VariantSource};
use serde_json::{Map, Value};

impl NormalizedSchema {
    /// Render this node as a raw schema.
    ///
    /// Normalizing the result yields this node again for trees without
    /// placeholders. Placeholders have no raw form and come out as `{}`;
    /// example names are dropped since raw `examples` are bare values.
    pub fn to_raw(&self) -> Value {
        let mut out = Map::new();

        let type_arms: Vec<&NormalizedSchema> = self.variants_from(VariantSource::Type).collect();
        if self.kind.is_primitive() {
            out.insert("type".to_string(), Value::String(self.kind.to_string()));
        } else if let Some(declared) = self.declared_type() {
            out.insert("type".to_string(), Value::String(declared.kind.to_string()));
        } else if !type_arms.is_empty() {
            let names = type_arms
                .iter()
                .map(|arm| Value::String(arm.kind.to_string()))
                .collect();
            out.insert("type".to_string(), Value::Array(names));
        }

        if let Some(ref title) = self.title {
            out.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(ref description) = self.description {
            out.insert("description".to_string(), Value::String(description.clone()));
        }
        if let Some(deprecated) = self.deprecated {
            out.insert("deprecated".to_string(), Value::Bool(deprecated));
        }

        // A union keeps its structure on the type arms
        let union_arms: &[&NormalizedSchema] = if type_arms.len() > 1 { &type_arms } else { &[] };
        let object_arm = union_arms.iter().find(|arm| arm.kind == SchemaKind::Object);
        let array_arm = union_arms.iter().find(|arm| arm.kind == SchemaKind::Array);
        write_structure(&mut out, object_arm.copied().unwrap_or(self));
        if let Some(items) = array_arm.copied().unwrap_or(self).items.as_deref() {
            out.insert("items".to_string(), items.to_raw());
        }

        for source in [VariantSource::AllOf, VariantSource::OneOf, VariantSource::AnyOf] {
            let Some(keyword) = source.keyword() else {
                continue;
            };
            let members: Vec<Value> = self.variants_from(source).map(NormalizedSchema::to_raw).collect();
            if !members.is_empty() {
                out.insert(keyword.to_string(), Value::Array(members));
            }
        }

        for (key, value) in &self.constraints {
            out.entry(key.clone()).or_insert_with(|| value.clone());
        }

        if !self.examples.is_empty() {
            let values = self.examples.iter().map(|ex| ex.value.clone()).collect();
            out.insert("examples".to_string(), Value::Array(values));
        }

        for (key, value) in &self.extensions {
            out.insert(key.clone(), value.clone());
        }

        Value::Object(out)
    }
}

fn write_structure(out: &mut Map<String, Value>, node: &NormalizedSchema) {
    if !node.properties.is_empty() {
        let properties = node
            .properties
            .iter()
            .map(|(name, child)| (name.clone(), child.to_raw()))
            .collect();
        out.insert("properties".to_string(), Value::Object(properties));
    }

    if !node.required_properties.is_empty() {
        let required = node
            .required_properties
            .iter()
            .cloned()
            .map(Value::String)
            .collect();
        out.insert("required".to_string(), Value::Array(required));
    }
}
