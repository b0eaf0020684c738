//! Operation documentation generator
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

use crate::documentation::fields::{collect_input_field_docs, FieldDoc};
use crate::documentation::markdown::html_to_markdown;
use crate::documentation::templates::Template;
use crate::resolver::SchemaTree;
use serde_json::Value;

/// Prefix paragraph for operations from an internal library
pub const INTERNAL_MARKER: &str = "**Internal:** true";

/// Documentation generator configuration
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Prefix the description with [`INTERNAL_MARKER`]
    pub mark_internal: bool,
}

/// Builds the Markdown description attached to one request
#[derive(Debug, Clone, Default)]
pub struct DocGenerator {
    config: GeneratorConfig,
}

impl DocGenerator {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Description Markdown, a blank line, then the body field list
    ///
    /// The blank line and description are omitted when the description is
    /// empty.
    pub fn generate(&self, description_html: Option<&str>, input: Option<&Value>, tree: &SchemaTree) -> String {
        let mut description = description_html.map(html_to_markdown).unwrap_or_default();
        if self.config.mark_internal {
            description = format!("{}\n\n{}", INTERNAL_MARKER, description).trim().to_string();
        }

        let body_fields = self.body_fields(input, tree);

        if description.trim().is_empty() {
            body_fields
        } else {
            format!("{}\n\n{}", description, body_fields)
        }
    }

    /// The `### Body fields` section on its own
    pub fn body_fields(&self, input: Option<&Value>, tree: &SchemaTree) -> String {
        match input.and_then(Value::as_object) {
            None => Template::no_body(),
            Some(params) => Template::body_fields(&collect_input_field_docs(params, tree)),
        }
    }

    /// Collected field docs without rendering, empty when there is no input
    pub fn field_docs(&self, input: Option<&Value>, tree: &SchemaTree) -> Vec<FieldDoc> {
        input
            .and_then(Value::as_object)
            .map(|params| collect_input_field_docs(params, tree))
            .unwrap_or_default()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_description_and_fields() {
        let tree = SchemaTree::new(json!({}));
        let input = json!({"name": {"type": "std::string", "description": "Item <i>name</i>"}});

        let doc = DocGenerator::new().generate(Some("<p>Creates items.</p>"), Some(&input), &tree);
        assert_eq!(
            doc,
            "Creates items.\n\n### Body fields\n- `name` *(std::string)* — Item _name_"
        );
    }

    #[test]
    fn test_no_description() {
        let tree = SchemaTree::new(json!({}));
        assert_eq!(
            DocGenerator::new().generate(None, None, &tree),
            "### Body fields\n*(no body)*"
        );
        assert_eq!(
            DocGenerator::new().generate(Some("  "), Some(&json!({})), &tree),
            "### Body fields\n*(no fields)*"
        );
    }

    #[test]
    fn test_internal_marker() {
        let tree = SchemaTree::new(json!({}));
        let generator = DocGenerator::with_config(GeneratorConfig { mark_internal: true });

        assert_eq!(
            generator.generate(None, None, &tree),
            "**Internal:** true\n\n### Body fields\n*(no body)*"
        );
        assert_eq!(
            generator.generate(Some("<p>Hidden</p>"), None, &tree),
            "**Internal:** true\n\nHidden\n\n### Body fields\n*(no body)*"
        );
    }

    #[test]
    fn test_field_docs_without_input() {
        let tree = SchemaTree::new(json!({}));
        assert!(DocGenerator::new().field_docs(None, &tree).is_empty());
    }
}
