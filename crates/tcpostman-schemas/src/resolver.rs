//! Schema tree and namespaced reference resolution
//!
//! This module handles:
//! - Holding the parsed structure document read-only for a whole run
//! - Resolving `A::B::C` references one segment at a time
//! - Tracking in-flight references so recursive walks terminate
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

use crate::types::SCOPE_SEPARATOR;
use serde_json::{Map, Value};

/// The parsed structure document
///
/// Key order follows the source document. Nothing mutates the tree after
/// loading, so every engine borrows it immutably.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaTree {
    root: Value,
}

impl SchemaTree {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Top-level entries, empty when the root is not an object
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.root.as_object().into_iter().flatten()
    }

    /// Resolve a namespaced path against the root
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        resolve_type_path(&self.root, path)
    }

    /// Resolve a path and require an object at the end of it
    pub fn resolve_object(&self, path: &str) -> Option<&Map<String, Value>> {
        self.resolve(path).and_then(Value::as_object)
    }

    pub fn into_inner(self) -> Value {
        self.root
    }
}

impl From<Value> for SchemaTree {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

/// Walk `path` segment by segment from `root`
///
/// A missing segment or a non-object intermediate yields `None`.
pub fn resolve_type_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split(SCOPE_SEPARATOR)
        .try_fold(root, |node, segment| node.as_object()?.get(segment))
}

/// Stack of references currently being expanded
///
/// A reference that is already on the stack marks a cycle; callers stop
/// descending and emit a placeholder instead.
#[derive(Debug, Clone, Default)]
pub struct ResolutionStack {
    stack: Vec<String>,
}

impl ResolutionStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a reference; returns `false` if it is already in flight
    pub fn enter(&mut self, reference: &str) -> bool {
        if self.contains(reference) {
            return false;
        }
        self.stack.push(reference.to_string());
        true
    }

    /// Pop a reference pushed by a successful [`enter`](Self::enter)
    pub fn leave(&mut self, reference: &str) {
        if let Some(pos) = self.stack.iter().rposition(|r| r == reference) {
            self.stack.remove(pos);
        }
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.stack.iter().any(|r| r == reference)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The current chain joined with `->`, for diagnostics
    pub fn chain(&self) -> String {
        self.stack.join(" -> ")
    }
}
