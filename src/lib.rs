//! unfurl: reflow bracketed literal expressions.
//!
//! Parses a nested, comma-separated literal expression (lists, maps,
//! key-value pairs, call forms, strings, numbers) into a node tree and
//! renders it two ways: compact on a single line, or expanded one element
//! per line with four-space indentation and trailing commas.
//!
//! Each parse/render cycle is an independent, synchronous call over its own
//! tree; nothing is shared or retained between calls.

pub use crate::errors::{ErrorCategory, ErrorKind, SourceContext, UnfurlError};
pub use crate::syntax::Node;

pub mod cli;
pub mod errors;
pub mod region;
pub mod syntax;

/// Parse one expression. Fails with an [`UnfurlError`] on malformed input;
/// a partial tree is never returned.
pub fn parse(source_text: &str) -> Result<Node, UnfurlError> {
    syntax::parser::parse(
        source_text,
        SourceContext::from_input("expression", source_text),
    )
}

/// The compact single-line rendering of a parsed tree.
pub fn render_inline(tree: &Node) -> String {
    tree.inline()
}

/// The expanded one-element-per-line rendering of a parsed tree.
pub fn render_outline(tree: &Node) -> String {
    tree.outline()
}
