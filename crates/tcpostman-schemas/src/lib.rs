//! tcpostman Schemas - structure loading, sample synthesis and field docs
//!
//! This crate reads the service catalogue published by a Teamcenter web tier
//! (`structure.js`) and derives everything a request needs from it:
//!
//! - **Loading**: lenient extraction and parsing of the embedded JSON object
//! - **Resolution**: `A::B::C` references walked against the schema tree
//! - **Samples**: deterministic example payloads, cycle-safe
//! - **Documentation**: HTML descriptions as Markdown and flattened field lists
//!
//! ## Quick Start
//!
//! ```rust
//! use tcpostman_schemas::{synthesize, ResolutionStack, SchemaTree};
//! use serde_json::json;
//!
//! let tree = SchemaTree::new(json!({
//!     "Ns": {"Item": {"name": {"type": "std::string"}, "tags": {"type": "std::string[]"}}}
//! }));
//!
//! let sample = synthesize("Ns::Item", &tree, &mut ResolutionStack::new());
//! assert_eq!(sample, json!({"name": "", "tags": [""]}));
//! ```
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

pub mod documentation;
pub mod loader;
pub mod resolver;
pub mod sample;
pub mod types;

// Re-export commonly used types for convenience
pub use documentation::{html_to_markdown, DocGenerator, FieldDoc, GeneratorConfig};
pub use loader::{LoaderError, LoaderResult, StructureParser};
pub use resolver::{resolve_type_path, ResolutionStack, SchemaTree};
pub use sample::{input_body_sample, output_fields_sample, shallow_sample, synthesize};
pub use types::{display_type, FieldDef, PrimitiveKind, TypeDescriptor};
