//! Example generation from normalized schemas
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod formats;
pub mod generator;

pub use formats::format_example;
pub use generator::{render_example, ExampleGenerator};
