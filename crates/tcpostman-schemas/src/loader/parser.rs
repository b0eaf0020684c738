//! Lenient parsing of structure documents
//!
//! A `structure.js` file is a script that assigns one large object literal;
//! the loader cuts that literal out of the surrounding code and parses it
//! as JSON. Hand-edited documents may carry comments, unquoted keys or
//! single-quoted strings, so strict JSON falls back to YAML flow syntax.
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::resolver::SchemaTree;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Script text with an embedded object literal (.js and anything unknown)
    StructureJs,
    /// Lenient JSON (.json, .config)
    Json,
    /// YAML format (.yaml, .yml)
    Yaml,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("json") | Some("config") => Format::Json,
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::StructureJs,
        }
    }
}

/// Parser for structure documents and lenient JSON configuration
#[derive(Debug, Default)]
pub struct StructureParser;

impl StructureParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LoaderError::io_error(path, e))?;

        self.parse_content(&content, Format::from_path(path), path)
    }

    /// Load a structure document and require an object at its root
    pub fn load_tree(&self, path: &Path) -> LoaderResult<SchemaTree> {
        let root = self.parse_file(path)?;
        if !root.is_object() {
            return Err(LoaderError::invalid_root(path, kind_name(&root)));
        }
        Ok(SchemaTree::new(root))
    }

    /// Parse content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::StructureJs => self.parse_structure_js(content, path),
            Format::Json => self.parse_lenient_json(content, path),
            Format::Yaml => self.parse_yaml(content, path),
        }
    }

    /// Extract the embedded root object and parse it leniently
    pub fn parse_structure_js(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let object = extract_root_object(content).ok_or_else(|| LoaderError::no_root_object(path))?;
        debug!(bytes = object.len(), "extracted root object");
        self.parse_lenient_json(object, path)
    }

    /// Strip comments, try strict JSON, then YAML flow syntax
    pub fn parse_lenient_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let cleaned = strip_comments(content);

        match serde_json::from_str(&cleaned) {
            Ok(value) => Ok(value),
            Err(json_err) => match self.parse_yaml(&cleaned, path) {
                Ok(value) => {
                    debug!(path = %path.display(), "strict JSON failed, accepted as YAML flow syntax");
                    Ok(value)
                }
                Err(_) => Err(LoaderError::json_parse_error(path, json_err)),
            },
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| LoaderError::yaml_parse_error(path, e))?;

        serde_json::to_value(yaml_value).map_err(|e| LoaderError::json_parse_error(path, e))
    }
}

/// The first balanced `{...}` span of `text`
///
/// Braces inside quoted strings and `//` or `/* */` comments do not count;
/// a backslash escapes the next character inside a string. Returns `None`
/// when no `{` exists or the object never closes.
pub fn extract_root_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut chars = text[start..].char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        let lookahead = chars.peek().map(|&(_, next)| next);
        match (ch, lookahead) {
            ('/', Some('/')) => {
                for (_, next) in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for (_, next) in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            ('"', _) | ('\'', _) => quote = Some(ch),
            ('{', _) => depth += 1,
            ('}', _) => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Remove `//` line comments and `/* */` block comments outside strings
///
/// Line comments keep their terminating newline so reported line numbers
/// still match the source.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        let lookahead = chars.peek().copied();
        match (ch, lookahead) {
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            ('"', _) | ('\'', _) => {
                quote = Some(ch);
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    out
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
