//! Adapters from document fragments to normalized schemas
//!
//! Channel parameters and protocol bindings are not schemas themselves but
//! are displayed through the same schema panels. These helpers shape them
//! into [`NormalizedSchema`] trees.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::normalize::normalizer::follow_local_ref;
use crate::normalize::{NormalizedSchema, SchemaKind, SchemaNormalizer};
use serde_json::Value;

/// Extension recording where a channel parameter is read from
pub const PARAMETER_LOCATION_EXTENSION: &str = "x-parameter-location";

impl SchemaNormalizer {
    /// Build one object schema out of a channel parameter map.
    ///
    /// Each parameter becomes a required property holding the parameter's
    /// schema; a description on the parameter wins over the schema's own.
    /// Returns `None` when there are no parameters.
    pub fn parameters_to_schema(&self, parameters: &Value, root: &Value) -> Option<NormalizedSchema> {
        let parameters = parameters.as_object().filter(|p| !p.is_empty())?;

        let mut schema = NormalizedSchema::new(SchemaKind::Object);
        for (name, parameter) in parameters {
            let parameter = follow_local_ref(parameter, root);

            let mut property = match parameter.get("schema") {
                Some(raw) => self.normalize_in(raw, root),
                None => NormalizedSchema::unknown(),
            };
            if let Some(description) = parameter.get("description").and_then(Value::as_str) {
                property.description = Some(description.to_string());
            }
            if let Some(location) = parameter.get("location") {
                property
                    .extensions
                    .insert(PARAMETER_LOCATION_EXTENSION.to_string(), location.clone());
            }

            schema.required_properties.insert(name.clone());
            schema.properties.insert(name.clone(), property);
        }

        Some(schema)
    }

    /// Infer one schema per protocol binding, in declaration order
    pub fn bindings_to_schemas(&self, bindings: &Value) -> Vec<(String, NormalizedSchema)> {
        let Some(bindings) = bindings.as_object() else {
            return Vec::new();
        };

        bindings
            .iter()
            .map(|(protocol, binding)| (protocol.clone(), self.normalize_json(binding)))
            .collect()
    }
}
