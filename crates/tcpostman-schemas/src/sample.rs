//! Sample payload synthesis
//!
//! Produces representative values for type descriptors: `false`, `0`,
//! `0.0` and `""` for scalars, one-element arrays, single-entry maps and
//! objects expanded from referenced definitions. Cyclic references expand
//! once per recursion path and then collapse to `{}`.
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

use crate::resolver::{ResolutionStack, SchemaTree};
use crate::types::{FieldDef, PrimitiveKind, Properties, TypeDescriptor};
use serde_json::{Map, Value};
use tracing::debug;

/// Map key used when the key type is an object reference
pub const OBJECT_KEY_PLACEHOLDER: &str = "AAAAAAAAAAAAAA";

/// Map key used for every other key type
pub const SAMPLE_KEY: &str = "SampleKey";

const OBJECT_KEY_MARKER: &str = "imodelobject";

/// Deep sample for `descriptor`
///
/// `guard` holds the references currently being expanded; pass a fresh
/// stack for each independent sample. The result depends only on the
/// descriptor and the tree.
pub fn synthesize(descriptor: &str, tree: &SchemaTree, guard: &mut ResolutionStack) -> Value {
    match TypeDescriptor::parse(descriptor) {
        TypeDescriptor::Array(element) => Value::Array(vec![synthesize(element, tree, guard)]),
        TypeDescriptor::Map { key, value } => {
            let mut map = Map::new();
            map.insert(map_key(key).to_string(), synthesize(value, tree, guard));
            Value::Object(map)
        }
        TypeDescriptor::Primitive(kind) => primitive_sample(kind),
        TypeDescriptor::Reference(reference) => sample_reference(reference, tree, guard),
        TypeDescriptor::Unknown(_) => empty_object(),
    }
}

/// Top-level-only sample: arrays become `[]`, maps and references `{}`
pub fn shallow_sample(descriptor: &str) -> Value {
    match TypeDescriptor::parse(descriptor) {
        TypeDescriptor::Array(_) => Value::Array(Vec::new()),
        TypeDescriptor::Primitive(kind) => primitive_sample(kind),
        _ => empty_object(),
    }
}

/// Request body for an operation's `input` parameters
///
/// Inline `properties` objects are expanded child by child and enumerated
/// parameters take their first value; everything else is a deep sample of
/// the declared type.
pub fn input_body_sample(input: Option<&Value>, tree: &SchemaTree) -> Value {
    let mut body = Map::new();

    let Some(params) = input.and_then(Value::as_object) else {
        return Value::Object(body);
    };

    for (name, param) in params {
        let def = FieldDef::new(param);
        let sample = match def.properties() {
            Properties::Inline(children) => {
                let expanded = children
                    .iter()
                    .map(|(child_name, child)| {
                        let child_type = FieldDef::new(child).type_name();
                        let sample = synthesize(child_type, tree, &mut ResolutionStack::new());
                        (child_name.clone(), sample)
                    })
                    .collect();
                Value::Object(expanded)
            }
            Properties::Enumeration(_) => match def.first_enum_value() {
                Some(first) => Value::String(first),
                None => synthesize(def.type_name(), tree, &mut ResolutionStack::new()),
            },
            Properties::Absent => synthesize(def.type_name(), tree, &mut ResolutionStack::new()),
        };
        body.insert(name.clone(), sample);
    }

    Value::Object(body)
}

/// Shallow samples for each top-level `output` field, in schema order
pub fn output_fields_sample(output: Option<&Value>) -> Map<String, Value> {
    output
        .and_then(Value::as_object)
        .map(|fields| {
            fields
                .iter()
                .map(|(name, field)| (name.clone(), shallow_sample(FieldDef::new(field).type_name())))
                .collect()
        })
        .unwrap_or_default()
}

fn sample_reference(reference: &str, tree: &SchemaTree, guard: &mut ResolutionStack) -> Value {
    if !guard.enter(reference) {
        debug!(reference, chain = %guard.chain(), "cyclic reference, using empty object");
        return empty_object();
    }

    let sample = match tree.resolve(reference) {
        Some(node) => match FieldDef::new(node).first_enum_value() {
            Some(first) => Value::String(first),
            None => match node.as_object() {
                Some(fields) => sample_fields(fields, tree, guard),
                None => empty_object(),
            },
        },
        None => {
            debug!(reference, "unresolved type reference");
            empty_object()
        }
    };

    guard.leave(reference);
    sample
}

fn sample_fields(fields: &Map<String, Value>, tree: &SchemaTree, guard: &mut ResolutionStack) -> Value {
    let mut object = Map::new();

    for (name, field) in fields {
        let def = FieldDef::new(field);
        let value = match def.first_enum_value() {
            Some(first) => Value::String(first),
            None => synthesize(def.type_name(), tree, guard),
        };
        object.insert(name.clone(), value);
    }

    Value::Object(object)
}

fn map_key(key_type: &str) -> &'static str {
    if key_type.to_lowercase().contains(OBJECT_KEY_MARKER) {
        OBJECT_KEY_PLACEHOLDER
    } else {
        SAMPLE_KEY
    }
}

fn primitive_sample(kind: PrimitiveKind) -> Value {
    match kind {
        PrimitiveKind::Boolean => Value::Bool(false),
        PrimitiveKind::Integer => Value::from(0),
        PrimitiveKind::Floating => Value::from(0.0),
        PrimitiveKind::Text | PrimitiveKind::DateTime | PrimitiveKind::Identifier => {
            Value::String(String::new())
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample(descriptor: &str, tree: &SchemaTree) -> Value {
        synthesize(descriptor, tree, &mut ResolutionStack::new())
    }

    fn empty_tree() -> SchemaTree {
        SchemaTree::new(json!({}))
    }

    #[test]
    fn test_primitive_samples() {
        let tree = empty_tree();
        assert_eq!(sample("bool", &tree), json!(false));
        assert_eq!(sample("int", &tree), json!(0));
        assert_eq!(sample("double", &tree), json!(0.0));
        assert_eq!(sample("std::string", &tree), json!(""));
        assert_eq!(sample("DateTime", &tree), json!(""));
        assert_eq!(sample("object", &tree), json!({}));
    }

    #[test]
    fn test_floating_sample_serializes_with_fraction() {
        let tree = empty_tree();
        assert_eq!(serde_json::to_string(&sample("float", &tree)).unwrap(), "0.0");
    }

    #[test]
    fn test_array_and_nested_array() {
        let tree = empty_tree();
        assert_eq!(sample("int[]", &tree), json!([0]));
        assert_eq!(sample("std::string[][]", &tree), json!([[""]]));
    }

    #[test]
    fn test_map_keys() {
        let tree = empty_tree();
        assert_eq!(
            sample("Teamcenter::Soa::Client::Model::IModelObject;std::string", &tree),
            json!({"AAAAAAAAAAAAAA": ""})
        );
        assert_eq!(sample("std::string;int", &tree), json!({"SampleKey": 0}));
        assert_eq!(sample("std::string;int[]", &tree), json!([{"SampleKey": 0}]));
    }

    #[test]
    fn test_reference_expands_fields_in_order() {
        let tree = SchemaTree::new(json!({
            "Ns": {
                "Item": {
                    "name": {"type": "std::string"},
                    "count": {"type": "int"},
                    "state": {"type": "Ns::State", "properties": ["Working", "Released"]},
                    "child": {"type": "Ns::Child"}
                },
                "Child": {"flag": {"type": "bool"}}
            }
        }));

        let value = sample("Ns::Item", &tree);
        assert_eq!(
            value,
            json!({"name": "", "count": 0, "state": "Working", "child": {"flag": false}})
        );
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "count", "state", "child"]);
    }

    #[test]
    fn test_reference_to_enumeration_definition() {
        let tree = SchemaTree::new(json!({
            "Foo": {"Bar": {"Status": {"type": "enum", "properties": ["Open", "Closed"]}}}
        }));
        assert_eq!(sample("Foo::Bar::Status", &tree), json!("Open"));
    }

    #[test]
    fn test_unresolved_reference_is_empty_object() {
        let tree = empty_tree();
        assert_eq!(sample("Missing::Type", &tree), json!({}));
        assert_eq!(sample("Missing::Type[]", &tree), json!([{}]));
    }

    #[test]
    fn test_cycle_breaks_once_per_path() {
        let tree = SchemaTree::new(json!({
            "Ns": {
                "Node": {
                    "id": {"type": "int"},
                    "next": {"type": "Ns::Node"},
                    "children": {"type": "Ns::Node[]"}
                }
            }
        }));

        assert_eq!(
            sample("Ns::Node", &tree),
            json!({"id": 0, "next": {}, "children": [{}]})
        );
    }

    #[test]
    fn test_guard_is_restored_after_sampling() {
        let tree = SchemaTree::new(json!({"Ns": {"A": {"x": {"type": "int"}}}}));
        let mut guard = ResolutionStack::new();
        synthesize("Ns::A", &tree, &mut guard);
        assert!(guard.is_empty());
    }

    #[test]
    fn test_shallow_sample() {
        assert_eq!(shallow_sample("Ns::Thing[]"), json!([]));
        assert_eq!(shallow_sample("std::string;int"), json!({}));
        assert_eq!(shallow_sample("Ns::Thing"), json!({}));
        assert_eq!(shallow_sample("bool"), json!(false));
        assert_eq!(shallow_sample("std::string"), json!(""));
    }

    #[test]
    fn test_input_body_sample() {
        let tree = SchemaTree::new(json!({
            "Ns": {"Info": {"uid": {"type": "std::string"}, "rev": {"type": "Ns::Info"}}}
        }));
        let input = json!({
            "info": {"type": "Ns::Info"},
            "mode": {"type": "std::string", "properties": ["Fast", "Slow"]},
            "inline": {
                "type": "object",
                "properties": {
                    "flag": {"type": "bool"},
                    "kind": {"type": "std::string", "properties": ["A"]}
                }
            },
            "untyped": {}
        });

        assert_eq!(
            input_body_sample(Some(&input), &tree),
            json!({
                "info": {"uid": "", "rev": {}},
                "mode": "Fast",
                "inline": {"flag": false, "kind": ""},
                "untyped": {}
            })
        );
    }

    #[test]
    fn test_input_body_without_input() {
        assert_eq!(input_body_sample(None, &empty_tree()), json!({}));
        assert_eq!(input_body_sample(Some(&json!("x")), &empty_tree()), json!({}));
    }

    #[test]
    fn test_output_fields_sample() {
        let output = json!({
            "serviceData": {"type": "Teamcenter::Soa::Server::ServiceData"},
            "names": {"type": "std::string[]"},
            "count": {"type": "int"}
        });
        let fields = output_fields_sample(Some(&output));
        assert_eq!(Value::Object(fields), json!({"serviceData": {}, "names": [], "count": 0}));
    }
}
