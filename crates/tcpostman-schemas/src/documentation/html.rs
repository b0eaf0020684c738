//! Parser-agnostic HTML node tree
//!
//! Descriptions are parsed with html5ever into an `RcDom` and immediately
//! copied into [`HtmlNode`], which owns plain strings and can be built by
//! hand in tests. Comments, doctypes and processing instructions are
//! dropped during the copy.
//!
//! Both the copy and dropping an [`HtmlNode`] use explicit stacks, so
//! arbitrarily deep markup cannot exhaust the call stack.
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// An element or text node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<HtmlNode>,
    },
    Text(String),
}

impl HtmlNode {
    pub fn element(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self::Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Add an attribute to an element; text nodes are returned unchanged
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { attrs, .. } = &mut self {
            attrs.push((name.into(), value.into()));
        }
        self
    }

    /// Lowercase tag name, `None` for text
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text(_) => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
            Self::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[HtmlNode] {
        match self {
            Self::Element { children, .. } => children,
            Self::Text(_) => &[],
        }
    }
}

impl Drop for HtmlNode {
    fn drop(&mut self) {
        let Self::Element { children, .. } = self else {
            return;
        };

        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Self::Element { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

/// Parse an HTML fragment and return its `<body>` element
///
/// html5ever always synthesizes a body, so this never fails; the fallback
/// empty body only covers a malformed DOM.
pub fn parse_fragment(html: &str) -> HtmlNode {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    find_body(&dom.document)
        .and_then(|body| convert(&body))
        .unwrap_or_else(|| HtmlNode::element("body", Vec::new()))
}

fn find_body(document: &Handle) -> Option<Handle> {
    let mut pending = vec![document.clone()];

    while let Some(handle) = pending.pop() {
        if let NodeData::Element { name, .. } = &handle.data {
            if &*name.local == "body" {
                return Some(handle);
            }
        }
        pending.extend(handle.children.borrow().iter().rev().cloned());
    }

    None
}

/// An element being copied, with the children converted so far
struct Frame {
    handle: Handle,
    next_child: usize,
    children: Vec<HtmlNode>,
}

impl Frame {
    fn new(handle: Handle) -> Self {
        Self {
            handle,
            next_child: 0,
            children: Vec::new(),
        }
    }
}

/// Copy an rcdom element and its descendants into an [`HtmlNode`]
fn convert(root: &Handle) -> Option<HtmlNode> {
    let mut stack = vec![Frame::new(root.clone())];

    loop {
        let frame = stack.last_mut()?;
        let child = frame.handle.children.borrow().get(frame.next_child).cloned();

        let Some(child) = child else {
            let done = stack.pop()?;
            let node = element_node(&done.handle, done.children)?;
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => return Some(node),
            }
            continue;
        };

        frame.next_child += 1;
        match &child.data {
            NodeData::Text { contents } => frame.children.push(HtmlNode::Text(contents.borrow().to_string())),
            NodeData::Element { .. } => stack.push(Frame::new(child.clone())),
            _ => {}
        }
    }
}

fn element_node(handle: &Handle, children: Vec<HtmlNode>) -> Option<HtmlNode> {
    let NodeData::Element { name, attrs, .. } = &handle.data else {
        return None;
    };
    let attrs = attrs
        .borrow()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect();

    Some(HtmlNode::Element {
        tag: name.local.to_ascii_lowercase().to_string(),
        attrs,
        children,
    })
}
