//! Flattened field documentation
//!
//! Walks an operation's input parameters and emits one [`FieldDoc`] per
//! dotted path (`info.props.name`), following inline property objects and
//! namespaced references. Enumerations, maps and primitives are leaves.
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

use crate::documentation::markdown::html_to_markdown;
use crate::resolver::{ResolutionStack, SchemaTree};
use crate::types::{display_type, FieldDef, Properties, TypeDescriptor};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();

fn whitespace_run() -> &'static Regex {
    WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// One documented field path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDoc {
    /// Dotted path from the top-level parameter
    pub path: String,
    /// Display type, with maps rendered as `(K → V) map`
    #[serde(rename = "type")]
    pub type_name: String,
    /// Markdown description collapsed to a single line
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl FieldDoc {
    pub fn new(path: impl Into<String>, raw_type: &str, description: &str) -> Self {
        Self {
            path: path.into(),
            type_name: display_type(raw_type),
            description: normalize_description(description),
            enum_values: Vec::new(),
        }
    }

    pub fn with_enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = values;
        self
    }
}

fn normalize_description(markdown: &str) -> String {
    whitespace_run().replace_all(markdown, " ").trim().to_string()
}

/// Recursive collector shared by all parameters of one operation
///
/// `visited` deduplicates paths across the whole operation while the
/// resolution stack only spans the current descent.
pub struct FieldDocCollector<'t> {
    tree: &'t SchemaTree,
    type_stack: ResolutionStack,
    visited: HashSet<String>,
    docs: Vec<FieldDoc>,
}

impl<'t> FieldDocCollector<'t> {
    pub fn new(tree: &'t SchemaTree) -> Self {
        Self {
            tree,
            type_stack: ResolutionStack::new(),
            visited: HashSet::new(),
            docs: Vec::new(),
        }
    }

    /// Document `node` at `path` and everything reachable below it
    pub fn collect(&mut self, path: &str, node: &Value) {
        if self.visited.contains(path) {
            return;
        }

        let def = FieldDef::new(node);
        let raw_type = def.type_name();
        let description = def.description().map(html_to_markdown).unwrap_or_default();

        match def.properties() {
            Properties::Enumeration(_) => {
                let values = def.enum_values().unwrap_or_default();
                self.emit(FieldDoc::new(path, raw_type, &description).with_enum_values(values));
                return;
            }
            Properties::Inline(children) => {
                self.emit(FieldDoc::new(path, raw_type, &description));
                self.collect_children(path, children);
                return;
            }
            Properties::Absent => {}
        }

        match TypeDescriptor::parse(raw_type) {
            TypeDescriptor::Reference(reference) => {
                self.collect_reference(path, raw_type, reference, &description)
            }
            // Maps, primitive-likes and everything unrecognised stay leaves
            _ => self.emit(FieldDoc::new(path, raw_type, &description)),
        }
    }

    /// Documents collected so far, sorted by path
    pub fn finish(mut self) -> Vec<FieldDoc> {
        self.docs.sort_by(|a, b| a.path.cmp(&b.path));
        self.docs
    }

    fn collect_reference(&mut self, path: &str, raw_type: &str, reference: &str, description: &str) {
        if !self.type_stack.enter(reference) {
            debug!(path, reference, "cyclic reference in field docs");
            self.emit(FieldDoc::new(path, raw_type, description));
            return;
        }

        let tree = self.tree;
        match tree.resolve(reference) {
            Some(resolved) => match FieldDef::new(resolved).enum_values() {
                Some(values) => {
                    self.emit(FieldDoc::new(path, raw_type, description).with_enum_values(values));
                }
                None => {
                    self.emit(FieldDoc::new(path, raw_type, description));
                    if let Some(fields) = resolved.as_object() {
                        self.collect_children(path, fields);
                    }
                }
            },
            None => {
                debug!(path, reference, "unresolved type reference in field docs");
                self.emit(FieldDoc::new(path, raw_type, description));
            }
        }

        self.type_stack.leave(reference);
    }

    fn collect_children(&mut self, path: &str, children: &Map<String, Value>) {
        for (name, child) in children {
            self.collect(&format!("{}.{}", path, name), child);
        }
    }

    fn emit(&mut self, doc: FieldDoc) {
        self.visited.insert(doc.path.clone());
        self.docs.push(doc);
    }
}

/// Field docs for every top-level parameter of an operation input
pub fn collect_input_field_docs(params: &Map<String, Value>, tree: &SchemaTree) -> Vec<FieldDoc> {
    let mut collector = FieldDocCollector::new(tree);
    for (name, param) in params {
        collector.collect(name, param);
    }
    collector.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn docs_for(input: Value, tree: &SchemaTree) -> Vec<FieldDoc> {
        collect_input_field_docs(input.as_object().unwrap(), tree)
    }

    fn paths(docs: &[FieldDoc]) -> Vec<&str> {
        docs.iter().map(|d| d.path.as_str()).collect()
    }

    #[test]
    fn test_enumeration_is_leaf() {
        let tree = SchemaTree::new(json!({}));
        let docs = docs_for(
            json!({"mode": {"type": "Ns::Mode", "description": "<p>How</p>", "properties": ["A", "B"]}}),
            &tree,
        );
        assert_eq!(
            docs,
            vec![FieldDoc {
                path: "mode".into(),
                type_name: "Ns::Mode".into(),
                description: "How".into(),
                enum_values: vec!["A".into(), "B".into()],
            }]
        );
    }

    #[test]
    fn test_reference_to_enumeration_definition() {
        let tree = SchemaTree::new(json!({
            "Foo": {"Bar": {"Status": {"type": "enum", "properties": ["Open", "Closed"]}}}
        }));
        let docs = docs_for(json!({"status": {"type": "Foo::Bar::Status"}}), &tree);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].path, "status");
        assert_eq!(docs[0].enum_values, vec!["Open", "Closed"]);
    }

    #[test]
    fn test_reference_expands_and_sorts() {
        let tree = SchemaTree::new(json!({
            "Ns": {
                "Info": {
                    "zeta": {"type": "int"},
                    "alpha": {"type": "std::string", "description": "First\n\n  letter"},
                    "attrs": {"type": "std::string;std::string"}
                }
            }
        }));
        let docs = docs_for(json!({"info": {"type": "Ns::Info"}}), &tree);

        assert_eq!(paths(&docs), vec!["info", "info.alpha", "info.attrs", "info.zeta"]);
        assert_eq!(docs[1].description, "First letter");
        assert_eq!(docs[2].type_name, "(std::string → std::string) map");
    }

    #[test]
    fn test_inline_properties() {
        let tree = SchemaTree::new(json!({}));
        let docs = docs_for(
            json!({
                "opts": {
                    "type": "object",
                    "properties": {"b": {"type": "bool"}, "a": {"type": "int[]"}}
                }
            }),
            &tree,
        );
        assert_eq!(paths(&docs), vec!["opts", "opts.a", "opts.b"]);
        assert_eq!(docs[1].type_name, "int[]");
    }

    #[test]
    fn test_cycle_terminates_with_placeholder() {
        let tree = SchemaTree::new(json!({
            "Ns": {
                "Node": {
                    "name": {"type": "std::string"},
                    "parent": {"type": "Ns::Node"}
                }
            }
        }));
        let docs = docs_for(json!({"root": {"type": "Ns::Node"}}), &tree);

        assert_eq!(paths(&docs), vec!["root", "root.name", "root.parent"]);
        assert_eq!(docs[2].type_name, "Ns::Node");
    }

    #[test]
    fn test_unresolved_and_fallback_are_single_docs() {
        let tree = SchemaTree::new(json!({}));
        let docs = docs_for(
            json!({
                "missing": {"type": "Ns::Missing"},
                "list": {"type": "Ns::Thing[]"},
                "plain": {}
            }),
            &tree,
        );
        assert_eq!(paths(&docs), vec!["list", "missing", "plain"]);
        assert_eq!(docs[2].type_name, "object");
    }

    #[test]
    fn test_fresh_collectors_agree() {
        let tree = SchemaTree::new(json!({
            "Ns": {"A": {"b": {"type": "Ns::B"}}, "B": {"a": {"type": "Ns::A"}, "n": {"type": "int"}}}
        }));
        let input = json!({"x": {"type": "Ns::A"}, "y": {"type": "Ns::B"}});

        let first = docs_for(input.clone(), &tree);
        let second = docs_for(input, &tree);
        assert_eq!(first, second);
    }

    #[test]
    fn test_field_doc_serialization() {
        let doc = FieldDoc::new("a", "int", "");
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"path": "a", "type": "int", "description": ""})
        );
    }
}
