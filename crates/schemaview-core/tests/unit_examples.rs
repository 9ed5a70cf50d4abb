//! Unit tests for example generation
//!
//! Exercises the resolution order (const, enum, examples, default, synthesized),
//! per-kind synthesis, configurable fallbacks, and cycle handling.

use serde_json::{json, Value};
use schemaview_core::{
    ExampleConfig, ExampleGenerator, Fallbacks, NormalizedSchema, SchemaKind, SchemaNormalizer,
};

fn example(schema: &Value) -> Value {
    let tree = SchemaNormalizer::new().normalize(schema);
    ExampleGenerator::new().generate(&tree)
}

#[cfg(test)]
mod resolution_order {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_const_wins_regardless_of_type() {
        assert_eq!(example(&json!({"type": "string", "const": 42})), json!(42));
        assert_eq!(
            example(&json!({"type": "integer", "const": 42, "enum": [1], "default": 7})),
            json!(42)
        );
    }

    #[test]
    fn test_first_enum_value() {
        assert_eq!(example(&json!({"enum": ["a", "b", "c"]})), json!("a"));
        assert_eq!(
            example(&json!({"type": "string", "enum": ["a", "b", "c"], "examples": ["z"]})),
            json!("a")
        );
    }

    #[test]
    fn test_empty_enum_falls_through() {
        assert_eq!(example(&json!({"type": "integer", "enum": [], "default": 3})), json!(3));
    }

    #[test]
    fn test_first_example_before_default() {
        assert_eq!(
            example(&json!({"type": "string", "examples": ["first", "second"], "default": "d"})),
            json!("first")
        );
    }

    #[test]
    fn test_default_before_synthesis() {
        assert_eq!(example(&json!({"type": "boolean", "default": true})), json!(true));
        assert_eq!(
            example(&json!({"type": "object", "default": {"preset": 1}, "properties": {"x": {"type": "string"}}})),
            json!({"preset": 1})
        );
    }
}

#[cfg(test)]
mod synthesis {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_object_in_declared_order() {
        let schema = json!({
            "type": "object",
            "properties": {
                "id": {"type": "integer"},
                "name": {"type": "string"}
            },
            "required": ["id"]
        });

        let value = example(&schema);
        assert_eq!(value, json!({"id": 0, "name": "example_name"}));

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name"]);
    }

    #[test]
    fn test_array_has_one_element() {
        let schema = json!({"type": "array", "items": {"type": "string", "format": "uri"}});
        assert_eq!(example(&schema), json!(["https://example.com"]));
    }

    #[test]
    fn test_nested_containers() {
        let schema = json!({
            "type": "object",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}},
                "owner": {
                    "type": "object",
                    "properties": {"since": {"type": "string", "format": "date"}}
                }
            }
        });
        assert_eq!(
            example(&schema),
            json!({"tags": ["example_tags"], "owner": {"since": "2025-01-31"}})
        );
    }

    #[test]
    fn test_primitives() {
        assert_eq!(example(&json!({"type": "number"})), json!(0));
        assert_eq!(example(&json!({"type": "integer", "minimum": 18})), json!(18));
        assert_eq!(example(&json!({"type": "boolean"})), json!(false));
        assert_eq!(example(&json!({"type": "null"})), Value::Null);
    }

    #[test]
    fn test_unknown_is_sentinel_not_null() {
        let tree = SchemaNormalizer::new().normalize_schema(&json!({"description": "free"}));
        assert_eq!(tree.kind, SchemaKind::Unknown);
        assert_eq!(ExampleGenerator::new().generate(&tree), json!({}));
    }

    #[test]
    fn test_one_of_uses_first_variant() {
        let schema = json!({
            "oneOf": [
                {"type": "object", "properties": {"card": {"type": "string"}}},
                {"type": "object", "properties": {"iban": {"type": "string"}}}
            ]
        });
        assert_eq!(example(&schema), json!({"card": "example_card"}));
    }

    #[test]
    fn test_any_of_uses_first_variant() {
        assert_eq!(
            example(&json!({"anyOf": [{"type": "integer", "minimum": 2}, {"type": "string"}]})),
            json!(2)
        );
    }

    #[test]
    fn test_all_of_uses_merged_object() {
        let schema = json!({
            "allOf": [
                {"type": "object", "properties": {"a": {"type": "integer"}}},
                {"type": "object", "properties": {"b": {"type": "boolean"}}}
            ]
        });
        assert_eq!(example(&schema), json!({"a": 0, "b": false}));
    }

    #[test]
    fn test_all_of_without_properties_uses_first_member() {
        assert_eq!(
            example(&json!({"allOf": [{"type": "string", "format": "email"}]})),
            json!("user@example.com")
        );
    }

    #[test]
    fn test_nullable_type_union_uses_first_type() {
        assert_eq!(
            example(&json!({"type": ["string", "null"], "format": "uuid"})),
            json!("550e8400-e29b-41d4-a716-446655440000")
        );
        assert_eq!(example(&json!({"type": ["null", "string"]})), Value::Null);
    }

    #[test]
    fn test_constraint_only_schema_is_not_echoed() {
        assert_eq!(example(&json!({"format": "email"})), json!("user@example.com"));
        assert_eq!(example(&json!({"minimum": 3})), json!(3));
    }

    #[test]
    fn test_declared_type_beside_one_of() {
        assert_eq!(
            example(&json!({"type": "string", "format": "uri", "oneOf": [{"maxLength": 40}]})),
            json!("https://example.com")
        );
    }

    #[test]
    fn test_kafka_binding_with_embedded_schemas() {
        let bindings = json!({
            "kafka": {
                "groupId": {"type": "string", "enum": ["myGroupId"]},
                "clientId": {"type": "string", "enum": ["myClientId"]},
                "bindingVersion": "0.1.0"
            }
        });
        let schemas = SchemaNormalizer::new().bindings_to_schemas(&bindings);
        assert_eq!(schemas[0].0, "kafka");
        assert_eq!(schemas[0].1.properties["groupId"].kind, SchemaKind::String);
        assert_eq!(
            ExampleGenerator::new().generate(&schemas[0].1),
            json!({"groupId": "myGroupId", "clientId": "myClientId", "bindingVersion": "0.1.0"})
        );
    }

    #[test]
    fn test_inferred_binding_reproduces_values() {
        let binding = json!({"groupId": "billing", "clientId": {"max": 3}, "acks": 1.5});
        assert_eq!(example(&binding), binding);
    }
}

#[cfg(test)]
mod cycles {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_self_reference_resolves_to_sentinel() {
        let schema = json!({
            "type": "object",
            "properties": {
                "self": {"$ref": "#"},
                "name": {"type": "string"}
            }
        });
        assert_eq!(example(&schema), json!({"self": {}, "name": "example_name"}));
    }

    #[test]
    fn test_recursive_tree_terminates() {
        let doc = json!({
            "$ref": "#/definitions/node",
            "definitions": {
                "node": {
                    "type": "object",
                    "properties": {
                        "value": {"type": "integer"},
                        "children": {"type": "array", "items": {"$ref": "#/definitions/node"}}
                    }
                }
            }
        });
        let value = example(&doc);
        assert_eq!(value, json!({"value": 0, "children": [{}]}));
        assert!(serde_json::to_string(&value).is_ok());
    }

    #[test]
    fn test_generator_depth_ceiling() {
        let mut tree = NormalizedSchema::new(SchemaKind::String);
        for _ in 0..10 {
            let mut parent = NormalizedSchema::new(SchemaKind::Object);
            parent.properties.insert("next".to_string(), tree);
            tree = parent;
        }

        let config = ExampleConfig {
            max_depth: 2,
            ..ExampleConfig::default()
        };
        let value = ExampleGenerator::with_config(config).generate(&tree);
        assert_eq!(value, json!({"next": {"next": {}}}));
    }
}

#[cfg(test)]
mod configured_fallbacks {
    use super::*;
    use pretty_assertions::assert_eq;

    fn generator() -> ExampleGenerator {
        ExampleGenerator::with_config(ExampleConfig {
            fallbacks: Fallbacks {
                string: json!("lorem"),
                number: json!(1.5),
                integer: json!(7),
                boolean: json!(true),
                unknown: json!("?"),
            },
            ..ExampleConfig::default()
        })
    }

    #[test]
    fn test_overridden_literals() {
        let tree = SchemaNormalizer::new().normalize(&json!({
            "type": "object",
            "properties": {
                "n": {"type": "number"},
                "i": {"type": "integer"},
                "b": {"type": "boolean"},
                "loop": {"$ref": "#"}
            }
        }));
        assert_eq!(
            generator().generate(&tree),
            json!({"n": 1.5, "i": 7, "b": true, "loop": "?"})
        );
    }

    #[test]
    fn test_string_fallback_without_name() {
        let tree = SchemaNormalizer::new().normalize(&json!({"type": "string"}));
        assert_eq!(generator().generate(&tree), json!("lorem"));
    }

    #[test]
    fn test_fallbacks_from_yaml() {
        let config = ExampleConfig::from_yaml_str("fallbacks:\n  integer: 99\n").unwrap();
        let tree = SchemaNormalizer::new().normalize(&json!({"type": "integer"}));
        assert_eq!(ExampleGenerator::with_config(config).generate(&tree), json!(99));
    }
}
