//! Documentation generation for service operations
//!
//! This module converts HTML descriptions to Markdown and flattens operation
//! inputs into the `### Body fields` list shown with each request.
//!
//! # Example Usage
//!
//! ```rust
//! use tcpostman_schemas::documentation::DocGenerator;
//! use tcpostman_schemas::SchemaTree;
//! use serde_json::json;
//!
//! let tree = SchemaTree::new(json!({}));
//! let input = json!({"uid": {"type": "std::string", "description": "Object <b>uid</b>"}});
//!
//! let doc = DocGenerator::new().generate(Some("<p>Loads objects.</p>"), Some(&input), &tree);
//! assert!(doc.starts_with("Loads objects.\n\n### Body fields"));
//! ```
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

pub mod fields;
pub mod generator;
pub mod html;
pub mod markdown;
pub mod templates;

pub use fields::{collect_input_field_docs, FieldDoc, FieldDocCollector};
pub use generator::{DocGenerator, GeneratorConfig, INTERNAL_MARKER};
pub use html::{parse_fragment, HtmlNode};
pub use markdown::{convert_tree, html_to_markdown, MarkdownBuilder};
pub use templates::Template;
