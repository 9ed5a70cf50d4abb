//! Message payload and header examples
//!
//! A message shows author-supplied examples when it has any, and otherwise a
//! single example generated from the part's schema. Author examples come from
//! the message-level `examples` list first and the part schema's own
//! `examples` second.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::example::ExampleGenerator;
use crate::normalize::normalizer::follow_local_ref;
use crate::normalize::{NamedExample, SchemaNormalizer};
use crate::PARSER_EXTENSION_PREFIX;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Which part of a message an example describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagePart {
    Payload,
    Headers,
}

impl MessagePart {
    /// Key of the part inside a message and inside message examples
    pub fn key(&self) -> &'static str {
        match self {
            Self::Payload => "payload",
            Self::Headers => "headers",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Payload => "Payload",
            Self::Headers => "Headers",
        }
    }
}

/// Examples to display for one message part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleSet {
    pub part: MessagePart,
    pub examples: Vec<NamedExample>,
    /// True when the single example was generated rather than authored
    pub generated: bool,
}

/// Strip the bookkeeping keys a document parser injects into schemas
pub fn sanitize_example(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| !key.starts_with(PARSER_EXTENSION_PREFIX))
                .map(|(key, value)| (key.clone(), sanitize_example(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(values) => Value::Array(values.iter().map(sanitize_example).collect()),
        scalar => scalar.clone(),
    }
}

/// Author-supplied examples for `part`, sanitized. `None` when there are none.
pub fn message_examples(message: &Value, part: MessagePart, root: &Value) -> Option<Vec<NamedExample>> {
    let from_message: Vec<NamedExample> = message
        .get("examples")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| {
            let value = entry.get(part.key())?;
            let text = |key: &str| entry.get(key).and_then(Value::as_str).map(String::from);
            Some(
                NamedExample::new(sanitize_example(value))
                    .with_name(text("name"))
                    .with_summary(text("summary")),
            )
        })
        .collect();

    if !from_message.is_empty() {
        return Some(from_message);
    }

    let schema = follow_local_ref(message.get(part.key())?, root);
    let from_schema: Vec<NamedExample> = schema
        .get("examples")
        .and_then(Value::as_array)?
        .iter()
        .map(|value| NamedExample::new(sanitize_example(value)))
        .collect();

    (!from_schema.is_empty()).then_some(from_schema)
}

/// Picks authored examples or falls back to a generated one
#[derive(Debug, Clone, Default)]
pub struct MessageExampleResolver {
    normalizer: SchemaNormalizer,
    generator: ExampleGenerator,
}

impl MessageExampleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parts(normalizer: SchemaNormalizer, generator: ExampleGenerator) -> Self {
        Self {
            normalizer,
            generator,
        }
    }

    /// Examples for `part` of `message`, `None` when the message has no such part
    pub fn resolve(&self, message: &Value, root: &Value, part: MessagePart) -> Option<ExampleSet> {
        let schema = message.get(part.key()).filter(|schema| !schema.is_null())?;

        if let Some(examples) = message_examples(message, part, root) {
            return Some(ExampleSet {
                part,
                examples,
                generated: false,
            });
        }

        debug!(part = part.key(), "no authored examples, generating one");
        let tree = self.normalizer.normalize_in(schema, root);
        let value = sanitize_example(&self.generator.generate(&tree));

        Some(ExampleSet {
            part,
            examples: vec![NamedExample::new(value)],
            generated: true,
        })
    }
}
