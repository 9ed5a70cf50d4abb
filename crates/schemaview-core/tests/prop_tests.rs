//! Property-based tests for normalization and example generation
//!
//! These tests check that normalization is stable, that generation
//! terminates on arbitrary input, and that inferred schemas reproduce
//! the data they were read from.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use schemaview_core::{ExampleGenerator, SchemaNormalizer};

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,30}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        4,  // max depth
        24, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                proptest::collection::hash_map("[a-zA-Z_$][a-zA-Z0-9_]{0,12}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for plain JSON without arrays, whose inferred schema loses nothing
fn array_free_json_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-z]{0,12}".prop_map(Value::String),
    ];

    // `k`-prefixed keys never collide with schema keywords
    leaf.prop_recursive(3, 16, 4, |inner| {
        proptest::collection::hash_map("k[a-zA-Z0-9]{0,10}", inner, 0..4)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    })
}

/// Strategy for schemas built only from `type`, `properties`, `required`,
/// `items`, `title` and `minimum`
fn plain_schema_strategy() -> impl Strategy<Value = Value> {
    let leaf = (
        prop_oneof![
            Just("string"),
            Just("integer"),
            Just("number"),
            Just("boolean"),
            Just("null"),
        ],
        proptest::option::of("[A-Z][a-z]{0,8}"),
        proptest::option::of(0i64..100),
    )
        .prop_map(|(ty, title, minimum)| {
            let mut schema = json!({"type": ty});
            if let Some(t) = title {
                schema["title"] = json!(t);
            }
            if let Some(m) = minimum {
                schema["minimum"] = json!(m);
            }
            schema
        });

    leaf.prop_recursive(3, 20, 4, |inner| {
        prop_oneof![
            (
                proptest::collection::hash_map("[a-z]{1,8}", inner.clone(), 0..4),
                any::<bool>(),
            )
                .prop_map(|(props, require_first)| {
                    let properties: Map<String, Value> = props.into_iter().collect();
                    let mut schema = json!({"type": "object"});
                    if require_first {
                        if let Some(first) = properties.keys().next() {
                            schema["required"] = json!([first]);
                        }
                    }
                    if !properties.is_empty() {
                        schema["properties"] = Value::Object(properties);
                    }
                    schema
                }),
            inner.prop_map(|items| json!({"type": "array", "items": items})),
        ]
    })
}

proptest! {
    /// Property: normalizing the raw form of a normalized tree changes nothing
    #[test]
    fn prop_normalization_is_idempotent(
        schema in plain_schema_strategy()
    ) {
        let normalizer = SchemaNormalizer::new();
        let once = normalizer.normalize(&schema);
        let twice = normalizer.normalize(&once.to_raw());
        prop_assert_eq!(once, twice);
    }

    /// Property: arbitrary input normalizes and generates without panicking,
    /// and the example always serializes
    #[test]
    fn prop_generation_terminates_on_any_input(
        input in json_value_strategy()
    ) {
        let tree = SchemaNormalizer::new().normalize(&input);
        let example = ExampleGenerator::new().generate(&tree);
        prop_assert!(serde_json::to_string(&example).is_ok());
    }

    /// Property: the example for an inferred schema is the data it came from
    #[test]
    fn prop_inferred_example_reproduces_data(
        data in array_free_json_strategy()
    ) {
        let tree = SchemaNormalizer::new().normalize_json(&data);
        let example = ExampleGenerator::new().generate(&tree);
        prop_assert_eq!(example, data);
    }

    /// Property: normalizing the same input twice yields equal trees
    #[test]
    fn prop_normalization_is_deterministic(
        input in json_value_strategy()
    ) {
        let normalizer = SchemaNormalizer::new();
        prop_assert_eq!(normalizer.normalize(&input), normalizer.normalize(&input));
    }
}
