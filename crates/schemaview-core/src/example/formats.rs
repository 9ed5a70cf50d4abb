//! Placeholder literals for string formats
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

/// A plausible literal for a recognized `format`, `None` otherwise
pub fn format_example(format: &str) -> Option<&'static str> {
    let literal = match format {
        "date-time" => "2025-01-31T12:00:00Z",
        "date" => "2025-01-31",
        "time" => "12:00:00Z",
        "duration" => "P3D",
        "email" | "idn-email" => "user@example.com",
        "uri" | "url" | "iri" => "https://example.com",
        "uri-reference" | "iri-reference" => "/example/path",
        "hostname" | "idn-hostname" => "example.com",
        "ipv4" => "192.168.0.1",
        "ipv6" => "2001:db8::1",
        "uuid" => "550e8400-e29b-41d4-a716-446655440000",
        "byte" => "ZXhhbXBsZQ==",
        "binary" => "0110",
        "password" => "********",
        "regex" => "^[a-z]+$",
        _ => return None,
    };
    Some(literal)
}
