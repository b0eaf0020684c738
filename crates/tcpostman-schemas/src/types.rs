//! Type descriptors and field definitions
//!
//! Every field in a structure document names its type with a plain string:
//! `bool`, `std::string`, `int[]`, `Teamcenter::Soa::Client::Model::ModelObject`
//! or a map such as `Teamcenter::Soa::Client::Model::IModelObject;std::string`.
//! [`TypeDescriptor::parse`] classifies such a string once so that callers
//! dispatch on the shape instead of re-inspecting the text.
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};

/// Suffix marking an array of the preceding descriptor
pub const ARRAY_SUFFIX: &str = "[]";

/// Separator between the key and value descriptors of a map
pub const MAP_SEPARATOR: char = ';';

/// Separator between the segments of a namespaced reference
pub const SCOPE_SEPARATOR: &str = "::";

/// Type assumed for nodes that do not declare one
pub const DEFAULT_TYPE: &str = "object";

/// Namespace whose scoped names are scalars rather than schema references
const STD_NAMESPACE: &str = "std";

/// Scalar kinds recognised by substring match on the descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Boolean,
    Integer,
    Floating,
    Text,
    DateTime,
    Identifier,
}

impl PrimitiveKind {
    /// Detect a primitive kind from a descriptor, case-insensitively
    pub fn detect(descriptor: &str) -> Option<Self> {
        let lower = descriptor.to_lowercase();

        if lower.contains("bool") {
            Some(Self::Boolean)
        } else if lower.contains("int") || lower.contains("long") || lower.contains("short") {
            Some(Self::Integer)
        } else if lower.contains("double") || lower.contains("float") || lower.contains("decimal") {
            Some(Self::Floating)
        } else if lower.ends_with("string") {
            Some(Self::Text)
        } else if lower.contains("datetime") {
            Some(Self::DateTime)
        } else if lower.contains("uid") {
            Some(Self::Identifier)
        } else {
            None
        }
    }
}

/// The shape of a type descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDescriptor<'a> {
    /// `Element[]`
    Array(&'a str),
    /// `Key;Value`
    Map { key: &'a str, value: &'a str },
    /// `Namespace::Path::Type`
    Reference(&'a str),
    /// A scalar recognised by [`PrimitiveKind::detect`]
    Primitive(PrimitiveKind),
    /// Anything else, including the `object` default
    Unknown(&'a str),
}

impl<'a> TypeDescriptor<'a> {
    /// Classify a descriptor: array suffix, then map separator, then scope
    /// marker, else primitive by substring match.
    pub fn parse(raw: &'a str) -> Self {
        let descriptor = raw.trim();

        if let Some(element) = descriptor.strip_suffix(ARRAY_SUFFIX) {
            return Self::Array(element);
        }

        if let Some(idx) = descriptor.find(MAP_SEPARATOR) {
            if idx > 0 && idx < descriptor.len() - 1 {
                return Self::Map {
                    key: &descriptor[..idx],
                    value: &descriptor[idx + 1..],
                };
            }
        }

        if descriptor.contains(SCOPE_SEPARATOR) && !is_std_scoped(descriptor) {
            return Self::Reference(descriptor);
        }

        match PrimitiveKind::detect(descriptor) {
            Some(kind) => Self::Primitive(kind),
            None => Self::Unknown(descriptor),
        }
    }

    /// Primitives and (nested) arrays of primitives
    pub fn is_primitive_like(&self) -> bool {
        match self {
            Self::Primitive(_) => true,
            Self::Array(element) => TypeDescriptor::parse(element).is_primitive_like(),
            _ => false,
        }
    }
}

fn is_std_scoped(descriptor: &str) -> bool {
    descriptor
        .split(SCOPE_SEPARATOR)
        .next()
        .is_some_and(|namespace| namespace == STD_NAMESPACE)
}

/// Display string for a descriptor; maps render as `(K → V) map`
pub fn display_type(raw: &str) -> String {
    match TypeDescriptor::parse(raw) {
        TypeDescriptor::Map { key, value } => {
            format!("({} → {}) map", key.trim(), value.trim())
        }
        _ => raw.to_string(),
    }
}

/// How a field node uses its `properties` entry
#[derive(Debug, Clone, Copy)]
pub enum Properties<'a> {
    Absent,
    /// A list of literal values
    Enumeration(&'a [Value]),
    /// Named child definitions
    Inline(&'a Map<String, Value>),
}

/// Read-only view over one field definition node
///
/// Nodes that are not objects, or lack entries, fall back to defaults
/// rather than failing.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef<'a> {
    node: &'a Value,
}

impl<'a> FieldDef<'a> {
    pub fn new(node: &'a Value) -> Self {
        Self { node }
    }

    /// Declared type, or [`DEFAULT_TYPE`]
    pub fn type_name(&self) -> &'a str {
        self.node
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TYPE)
    }

    pub fn description(&self) -> Option<&'a str> {
        self.node.get("description").and_then(Value::as_str)
    }

    pub fn properties(&self) -> Properties<'a> {
        match self.node.get("properties") {
            Some(Value::Array(values)) => Properties::Enumeration(values),
            Some(Value::Object(children)) => Properties::Inline(children),
            _ => Properties::Absent,
        }
    }

    /// Enumerated values as text, if the node declares a list
    pub fn enum_values(&self) -> Option<Vec<String>> {
        match self.properties() {
            Properties::Enumeration(values) => Some(values.iter().map(value_text).collect()),
            _ => None,
        }
    }

    /// First enumerated value, if the node declares a non-empty list
    pub fn first_enum_value(&self) -> Option<String> {
        match self.properties() {
            Properties::Enumeration(values) => values.first().map(value_text),
            _ => None,
        }
    }
}

/// Text form of a literal: strings verbatim, `null` empty, others as JSON
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_shapes() {
        assert_eq!(TypeDescriptor::parse("int[]"), TypeDescriptor::Array("int"));
        assert_eq!(
            TypeDescriptor::parse("std::string;int"),
            TypeDescriptor::Map { key: "std::string", value: "int" }
        );
        assert_eq!(
            TypeDescriptor::parse(" Foo::Bar::Baz "),
            TypeDescriptor::Reference("Foo::Bar::Baz")
        );
        assert_eq!(
            TypeDescriptor::parse("bool"),
            TypeDescriptor::Primitive(PrimitiveKind::Boolean)
        );
        assert_eq!(TypeDescriptor::parse("object"), TypeDescriptor::Unknown("object"));
    }

    #[test]
    fn test_array_suffix_checked_before_separator() {
        assert_eq!(
            TypeDescriptor::parse("std::string;int[]"),
            TypeDescriptor::Array("std::string;int")
        );
    }

    #[test]
    fn test_map_needs_both_sides() {
        assert_eq!(
            TypeDescriptor::parse(";int"),
            TypeDescriptor::Primitive(PrimitiveKind::Integer)
        );
        assert_eq!(TypeDescriptor::parse("Foo::Bar;"), TypeDescriptor::Reference("Foo::Bar;"));
    }

    #[test]
    fn test_std_namespace_is_primitive() {
        assert_eq!(
            TypeDescriptor::parse("std::string"),
            TypeDescriptor::Primitive(PrimitiveKind::Text)
        );
        assert_eq!(TypeDescriptor::parse("std::vector"), TypeDescriptor::Unknown("std::vector"));
    }

    #[test]
    fn test_primitive_detection() {
        assert_eq!(PrimitiveKind::detect("Long"), Some(PrimitiveKind::Integer));
        assert_eq!(PrimitiveKind::detect("short"), Some(PrimitiveKind::Integer));
        assert_eq!(PrimitiveKind::detect("Decimal"), Some(PrimitiveKind::Floating));
        assert_eq!(PrimitiveKind::detect("String"), Some(PrimitiveKind::Text));
        assert_eq!(PrimitiveKind::detect("DateTime"), Some(PrimitiveKind::DateTime));
        assert_eq!(PrimitiveKind::detect("Uid"), Some(PrimitiveKind::Identifier));
        assert_eq!(PrimitiveKind::detect("ModelObject"), None);
    }

    #[test]
    fn test_primitive_like() {
        assert!(TypeDescriptor::parse("int[][]").is_primitive_like());
        assert!(!TypeDescriptor::parse("Foo::Bar[]").is_primitive_like());
        assert!(!TypeDescriptor::parse("object").is_primitive_like());
    }

    #[test]
    fn test_display_type() {
        assert_eq!(
            display_type("Foo::IModelObject ; std::string"),
            "(Foo::IModelObject → std::string) map"
        );
        assert_eq!(display_type("Foo::Bar"), "Foo::Bar");
    }

    #[test]
    fn test_field_def_defaults() {
        let node = json!("not an object");
        let def = FieldDef::new(&node);
        assert_eq!(def.type_name(), DEFAULT_TYPE);
        assert!(def.description().is_none());
        assert!(matches!(def.properties(), Properties::Absent));
    }

    #[test]
    fn test_field_def_enumeration() {
        let node = json!({"type": "Foo::Status", "properties": ["Open", 2, null]});
        let def = FieldDef::new(&node);
        assert_eq!(def.enum_values(), Some(vec!["Open".into(), "2".into(), "".into()]));
        assert_eq!(def.first_enum_value(), Some("Open".to_string()));

        let empty = json!({"properties": []});
        assert_eq!(FieldDef::new(&empty).first_enum_value(), None);
        assert_eq!(FieldDef::new(&empty).enum_values(), Some(Vec::new()));
    }
}
