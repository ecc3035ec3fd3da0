//! Syntax module for unfurl
//!
//! This module provides the node tree for bracketed literal expressions and
//! its two renderings: compact single-line (`inline`) and expanded
//! one-item-per-line (`outline`).

use serde::{Deserialize, Serialize};

pub mod parser;

pub use parser::parse;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Represents a span in the source code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// One indent level in outline renderings.
pub const INDENT: &str = "    ";

/// The node tree for a parsed expression.
///
/// All leaf content is opaque text: numbers, symbols, and quoted strings are
/// stored as the exact characters they matched (quotes included), so
/// rendering never normalizes literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A bare token: symbol, number, or quoted string (quotes kept).
    Text(String),
    /// Comma-separated elements, in source order.
    List(Vec<Node>),
    /// A delimiter pair around a (possibly empty) element list.
    Surrounded {
        prefix: String,
        suffix: String,
        content: Box<Node>,
    },
    /// A symbol immediately followed by a parenthesized group.
    Call { name: Box<Node>, args: Box<Node> },
    /// `key separator value`, separator text preserved verbatim.
    KeyValue {
        key: Box<Node>,
        separator: String,
        value: Box<Node>,
    },
}

// ============================================================================
// RENDERING
// ============================================================================

impl Node {
    /// Renders the tree on a single line, normalizing whitespace and
    /// dropping trailing commas.
    pub fn inline(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::List(items) => items
                .iter()
                .map(Node::inline)
                .collect::<Vec<_>>()
                .join(", "),
            Node::Surrounded {
                prefix,
                suffix,
                content,
            } => format!("{}{}{}", prefix, content.inline(), suffix),
            Node::Call { name, args } => format!("{}{}", name.inline(), args.inline()),
            Node::KeyValue {
                key,
                separator,
                value,
            } => format!(
                "{}{}{}",
                key.inline(),
                format_separator(separator),
                value.inline()
            ),
        }
    }

    /// Renders the tree expanded, one element per line, four spaces per
    /// nesting level, with a trailing comma after every non-empty list.
    pub fn outline(&self) -> String {
        self.outline_at(0)
    }

    // `depth` is the indent level of the enclosing surrounded group; each
    // group renders its own elements one level deeper.
    fn outline_at(&self, depth: usize) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::List(items) => {
                if items.is_empty() {
                    return String::new();
                }
                let pad = INDENT.repeat(depth);
                let mut rendered = items
                    .iter()
                    .map(|item| format!("{}{}", pad, item.outline_at(depth)))
                    .collect::<Vec<_>>()
                    .join(",\n");
                rendered.push(',');
                rendered
            }
            Node::Surrounded {
                prefix,
                suffix,
                content,
            } => {
                let body = content.outline_at(depth + 1);
                // An empty group stays on one line: `()`, `[]`, `{}`.
                if body.is_empty() {
                    return format!("{}{}", prefix, suffix);
                }
                format!("{}\n{}\n{}{}", prefix, body, INDENT.repeat(depth), suffix)
            }
            // A call name never spans lines; only the argument group expands.
            Node::Call { name, args } => format!("{}{}", name.inline(), args.outline_at(depth)),
            // Key and separator never span lines; only the value may expand.
            Node::KeyValue {
                key,
                separator,
                value,
            } => format!(
                "{}{}{}",
                key.inline(),
                format_separator(separator),
                value.outline_at(depth)
            ),
        }
    }

    /// Returns the variant name (for diagnostics and the `ast` dump).
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Text(_) => "Text",
            Node::List(_) => "List",
            Node::Surrounded { .. } => "Surrounded",
            Node::Call { .. } => "Call",
            Node::KeyValue { .. } => "KeyValue",
        }
    }
}

/// Colon-separated pairs always render with a trailing space; `=` renders
/// exactly as typed. The asymmetry mirrors the two host conventions the
/// separators come from.
fn format_separator(separator: &str) -> String {
    if separator == ":" {
        return ": ".to_string();
    }
    separator.to_string()
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    fn group(prefix: &str, suffix: &str, items: Vec<Node>) -> Node {
        Node::Surrounded {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            content: Box::new(Node::List(items)),
        }
    }

    #[test]
    fn text_renders_identically_in_both_modes() {
        let node = text("'foo'");
        assert_eq!(node.inline(), "'foo'");
        assert_eq!(node.outline(), "'foo'");
    }

    #[test]
    fn empty_group_stays_on_one_line() {
        let node = group("{", "}", vec![]);
        assert_eq!(node.inline(), "{}");
        assert_eq!(node.outline(), "{}");
    }

    #[test]
    fn list_outline_gets_trailing_comma() {
        let node = group("(", ")", vec![text("foo"), text("bar"), text("baz")]);
        assert_eq!(node.inline(), "(foo, bar, baz)");
        assert_eq!(node.outline(), "(\n    foo,\n    bar,\n    baz,\n)");
    }

    #[test]
    fn colon_separator_gains_a_space() {
        let node = Node::KeyValue {
            key: Box::new(text("foo")),
            separator: ":".to_string(),
            value: Box::new(text("bar")),
        };
        assert_eq!(node.inline(), "foo: bar");
    }

    #[test]
    fn equals_separator_is_verbatim() {
        let node = Node::KeyValue {
            key: Box::new(text("foo")),
            separator: "=".to_string(),
            value: Box::new(text("bar")),
        };
        assert_eq!(node.inline(), "foo=bar");
        assert_eq!(node.outline(), "foo=bar");
    }

    #[test]
    fn nested_groups_indent_four_spaces_per_level() {
        let inner = group("[", "]", vec![text("bong")]);
        let node = group("(", ")", vec![inner]);
        assert_eq!(node.outline(), "(\n    [\n        bong,\n    ],\n)");
    }

    #[test]
    fn call_name_stays_on_the_opening_line() {
        let call = Node::Call {
            name: Box::new(text("foo")),
            args: Box::new(group("(", ")", vec![text("bar")])),
        };
        let node = group("[", "]", vec![call]);
        assert_eq!(node.inline(), "[foo(bar)]");
        assert_eq!(node.outline(), "[\n    foo(\n        bar,\n    ),\n]");
    }

    #[test]
    fn key_value_with_expanding_value() {
        let kv = Node::KeyValue {
            key: Box::new(text("hi")),
            separator: ":".to_string(),
            value: Box::new(group("[", "]", vec![text("there"), text("jim")])),
        };
        let node = group("{", "}", vec![kv]);
        assert_eq!(node.inline(), "{hi: [there, jim]}");
        assert_eq!(
            node.outline(),
            "{\n    hi: [\n        there,\n        jim,\n    ],\n}"
        );
    }

    #[test]
    fn display_is_the_inline_form() {
        let node = group("(", ")", vec![text("foo")]);
        assert_eq!(node.to_string(), "(foo)");
    }
}
