//! HTML to Markdown conversion
//!
//! Operation and field descriptions are small HTML fragments using a narrow
//! tag subset: headings, paragraphs, line breaks, lists, emphasis, code,
//! links and `<font face="Courier ...">`. [`MarkdownBuilder`] walks an
//! [`HtmlNode`] tree with an explicit enter/leave stack, appends Markdown to
//! a buffer and normalizes blank lines at the end. Unknown tags contribute
//! only their text.
//!
//! ```
//! use tcpostman_schemas::documentation::html_to_markdown;
//!
//! assert_eq!(html_to_markdown("<p>Hello <b>world</b></p>"), "Hello **world**");
//! ```
//!
//! Copyright (c) 2025 tcpostman contributors
//! Licensed under the Apache-2.0 license

use crate::documentation::html::{parse_fragment, HtmlNode};
use regex::Regex;
use std::sync::OnceLock;

static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();
static TRAILING_BLANKS: OnceLock<Regex> = OnceLock::new();
static NEWLINE_RUN: OnceLock<Regex> = OnceLock::new();
static RESIDUAL_TAG: OnceLock<Regex> = OnceLock::new();

fn whitespace_run() -> &'static Regex {
    // \s covers U+00A0 in Unicode mode
    WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn trailing_blanks() -> &'static Regex {
    TRAILING_BLANKS.get_or_init(|| Regex::new(r"[ \t]+\n").expect("valid regex"))
}

fn newline_run() -> &'static Regex {
    NEWLINE_RUN.get_or_init(|| Regex::new(r"\n{3,}").expect("valid regex"))
}

fn residual_tag() -> &'static Regex {
    RESIDUAL_TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid regex"))
}

/// Convert an HTML fragment to Markdown; blank input yields an empty string
pub fn html_to_markdown(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    convert_tree(&parse_fragment(html))
}

/// Convert an already-parsed tree
pub fn convert_tree(root: &HtmlNode) -> String {
    let mut builder = MarkdownBuilder::new();
    builder.walk(root);
    builder.finish()
}

enum Visit<'a> {
    Enter(&'a HtmlNode),
    Leave(&'a HtmlNode),
}

/// Streaming Markdown writer driven by enter/leave events
#[derive(Debug, Default)]
pub struct MarkdownBuilder {
    out: String,
    link_targets: Vec<String>,
    code_modes: Vec<bool>,
    list_depth: usize,
}

impl MarkdownBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-order/post-order walk without recursion
    pub fn walk(&mut self, root: &HtmlNode) {
        let mut pending = vec![Visit::Enter(root)];

        while let Some(step) = pending.pop() {
            match step {
                Visit::Enter(node) => {
                    self.enter(node);
                    if let HtmlNode::Element { children, .. } = node {
                        pending.push(Visit::Leave(node));
                        pending.extend(children.iter().rev().map(Visit::Enter));
                    }
                }
                Visit::Leave(node) => self.leave(node),
            }
        }
    }

    /// Normalized Markdown for everything walked so far
    pub fn finish(self) -> String {
        let text = trailing_blanks().replace_all(&self.out, "\n");
        let text = newline_run().replace_all(&text, "\n\n");
        residual_tag().replace_all(text.trim(), "").into_owned()
    }

    fn enter(&mut self, node: &HtmlNode) {
        let tag = match node {
            HtmlNode::Text(text) => return self.text(text),
            HtmlNode::Element { tag, .. } => tag.as_str(),
        };

        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.ensure_blank_line();
                let level = usize::from(tag.as_bytes()[1] - b'0');
                self.out.push_str(&"#".repeat(level));
                self.out.push(' ');
            }
            "p" => self.ensure_blank_line(),
            "br" => self.out.push('\n'),
            "ul" | "ol" => {
                self.list_depth += 1;
                self.ensure_newline();
            }
            "li" => {
                self.ensure_newline();
                self.out.push_str(&"  ".repeat(self.list_depth.saturating_sub(1)));
                self.out.push_str("- ");
            }
            "strong" | "b" => self.out.push_str("**"),
            "em" | "i" | "u" => self.out.push('_'),
            "code" => {
                self.out.push('`');
                self.code_modes.push(true);
            }
            "pre" => {
                self.ensure_newline();
                self.out.push_str("```\n");
                self.code_modes.push(true);
            }
            "a" => {
                self.link_targets.push(node.attr("href").unwrap_or_default().to_string());
                self.out.push('[');
            }
            "font" if is_code_font(node) => {
                self.out.push('`');
                self.code_modes.push(true);
            }
            _ => {}
        }
    }

    fn leave(&mut self, node: &HtmlNode) {
        let Some(tag) = node.tag() else {
            return;
        };

        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" => self.out.push_str("\n\n"),
            "ul" | "ol" => {
                self.list_depth = self.list_depth.saturating_sub(1);
                self.out.push('\n');
            }
            "li" => self.out.push('\n'),
            "strong" | "b" => self.out.push_str("**"),
            "em" | "i" | "u" => self.out.push('_'),
            "code" => {
                self.out.push('`');
                self.code_modes.pop();
            }
            "pre" => {
                self.out.push_str("\n```\n\n");
                self.code_modes.pop();
            }
            "a" => {
                let href = self.link_targets.pop().unwrap_or_default();
                self.out.push(']');
                if !href.trim().is_empty() {
                    self.out.push('(');
                    self.out.push_str(&href);
                    self.out.push(')');
                }
            }
            "font" if is_code_font(node) => {
                self.code_modes.pop();
                self.out.push('`');
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_code() {
            self.out.push_str(text);
        } else {
            self.out.push_str(&whitespace_run().replace_all(text, " "));
        }
    }

    fn in_code(&self) -> bool {
        self.code_modes.last().copied().unwrap_or(false)
    }

    fn ensure_newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn ensure_blank_line(&mut self) {
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }
}

fn is_code_font(node: &HtmlNode) -> bool {
    node.attr("face")
        .is_some_and(|face| face.to_lowercase().contains("courier"))
}
