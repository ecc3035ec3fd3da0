//! Unfurl Parser
//!
//! Converts a bracketed literal expression into the Node tree. The parser is
//! purely syntactic: literals are kept as opaque text, nothing is evaluated
//! or normalized beyond whitespace and trailing commas.

use crate::errors::{parse_error, ErrorKind, SourceContext, UnfurlError};
use crate::syntax::{Node, Span};
use pest::error::{ErrorVariant, InputLocation};
use pest::{iterators::Pair, Parser};
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct ExprParser;

/// Defensive bound on delimiter nesting; deeper input is rejected before
/// the grammar ever recurses into it.
pub const MAX_NESTING: usize = 128;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse one bracketed literal expression into a Node tree.
///
/// The input must hold exactly one top-level expression; surrounding
/// whitespace is tolerated, anything else after the expression is an error.
pub fn parse(source_text: &str, source_context: SourceContext) -> Result<Node, UnfurlError> {
    lexical_scan(source_text, &source_context)?;

    let pairs = ExprParser::parse(Rule::top, source_text)
        .map_err(|e| convert_parse_error(e, source_text, &source_context))?;

    let top = pairs.peek().unwrap(); // pest guarantees the top rule exists
    let expr = top
        .into_inner()
        .find(|p| p.as_rule() == Rule::expr)
        .unwrap(); // anchored grammar guarantees exactly one expr

    // A single top-level element stands on its own; only genuinely bare
    // comma-separated input stays a list.
    match build_list(expr, &source_context)? {
        Node::List(mut items) if items.len() == 1 => Ok(items.pop().unwrap()),
        other => Ok(other),
    }
}

// ============================================================================
// NODE BUILDERS
// ============================================================================

fn build_node(pair: Pair<Rule>, source: &SourceContext) -> Result<Node, UnfurlError> {
    match pair.as_rule() {
        // Symbols, numbers, and quoted strings are all opaque text; a quoted
        // string keeps its quote characters.
        Rule::symbol | Rule::number | Rule::string => Ok(Node::Text(pair.as_str().to_string())),

        Rule::expr => build_list(pair, source),

        Rule::paren_group => build_group(pair, "(", ")", source),
        Rule::bracket_group => build_group(pair, "[", "]", source),
        Rule::brace_group => build_group(pair, "{", "}", source),

        Rule::call => {
            let mut inner = pair.into_inner();
            let name = build_node(inner.next().unwrap(), source)?; // grammar guarantees symbol
            let args = build_node(inner.next().unwrap(), source)?; // grammar guarantees group
            Ok(Node::Call {
                name: Box::new(name),
                args: Box::new(args),
            })
        }

        Rule::kv => build_kv(pair, source),

        rule => Err(parse_error(
            source,
            ErrorKind::UnexpectedToken {
                expected: "an expression".into(),
                found: format!("{:?}", rule),
            },
            get_span(&pair),
        )),
    }
}

fn build_list(pair: Pair<Rule>, source: &SourceContext) -> Result<Node, UnfurlError> {
    let items: Result<Vec<_>, _> = pair
        .into_inner()
        .map(|p| build_node(p, source))
        .collect();
    Ok(Node::List(items?))
}

fn build_group(
    pair: Pair<Rule>,
    prefix: &str,
    suffix: &str,
    source: &SourceContext,
) -> Result<Node, UnfurlError> {
    // An empty group still gets a content list, never an absent one.
    let content = match pair.into_inner().next() {
        Some(expr) => build_list(expr, source)?,
        None => Node::List(vec![]),
    };
    Ok(Node::Surrounded {
        prefix: prefix.to_string(),
        suffix: suffix.to_string(),
        content: Box::new(content),
    })
}

fn build_kv(pair: Pair<Rule>, source: &SourceContext) -> Result<Node, UnfurlError> {
    let span = get_span(&pair);
    let mut inner = pair.into_inner();

    let key_pair = inner.next().unwrap(); // grammar guarantees a key
    let key_text = key_pair.as_str().to_string();
    let key = build_node(key_pair, source)?;
    // The grammar only admits strings and symbols as keys; anything else
    // reaching this point is a hard failure, never a silent downgrade.
    if !matches!(key, Node::Text(_)) {
        return Err(parse_error(
            source,
            ErrorKind::MalformedKey { found: key_text },
            span,
        ));
    }

    let separator = inner.next().unwrap().as_str().to_string(); // grammar guarantees kv_sep
    let value = build_node(inner.next().unwrap(), source)?; // grammar guarantees a value

    Ok(Node::KeyValue {
        key: Box::new(key),
        separator,
        value: Box::new(value),
    })
}

// ============================================================================
// LEXICAL GUARD
// ============================================================================

// Catches the two conditions pest reports poorly: a string literal that
// never closes, and delimiter nesting past the defensive bound.
fn lexical_scan(text: &str, source: &SourceContext) -> Result<(), UnfurlError> {
    let mut depth = 0usize;
    let mut in_string: Option<(char, usize)> = None;

    for (pos, ch) in text.char_indices() {
        if let Some((quote, _)) = in_string {
            if ch == quote {
                in_string = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' => in_string = Some((ch, pos)),
            '(' | '[' | '{' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(parse_error(
                        source,
                        ErrorKind::NestingLimit { limit: MAX_NESTING },
                        Span {
                            start: pos,
                            end: pos + 1,
                        },
                    ));
                }
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    if let Some((quote, pos)) = in_string {
        return Err(parse_error(
            source,
            ErrorKind::UnterminatedString { quote },
            Span {
                start: pos,
                end: pos + 1,
            },
        ));
    }
    Ok(())
}

// ============================================================================
// UTILITIES
// ============================================================================

fn get_span(pair: &Pair<Rule>) -> Span {
    Span {
        start: pair.as_span().start(),
        end: pair.as_span().end(),
    }
}

fn closer_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Innermost opener left unmatched at end of input, quote-aware. Mismatched
/// closers disqualify the scan; those are reported as unexpected tokens.
fn unclosed_opener(text: &str) -> Option<(char, usize)> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut in_string: Option<char> = None;

    for (pos, ch) in text.char_indices() {
        if let Some(quote) = in_string {
            if ch == quote {
                in_string = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' => in_string = Some(ch),
            '(' | '[' | '{' => stack.push((ch, pos)),
            ')' | ']' | '}' => match stack.last() {
                Some(&(open, _)) if closer_for(open) == ch => {
                    stack.pop();
                }
                _ => return None,
            },
            _ => {}
        }
    }
    stack.pop()
}

fn is_grammar_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '.' | '_'
                | '-'
                | '\''
                | '"'
                | '('
                | ')'
                | '['
                | ']'
                | '{'
                | '}'
                | '='
                | ':'
                | ','
                | ' '
                | '\t'
                | '\n'
                | '\r'
        )
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

fn convert_parse_error(
    error: pest::error::Error<Rule>,
    text: &str,
    source: &SourceContext,
) -> UnfurlError {
    let (start, end) = match error.location {
        InputLocation::Pos(pos) => (pos, pos),
        InputLocation::Span((start, end)) => (start, end),
    };
    let positives = match error.variant {
        ErrorVariant::ParsingError { positives, .. } => positives,
        ErrorVariant::CustomError { .. } => vec![],
    };

    // Failure at end of input with an opener still pending reads best as a
    // missing closer.
    if start >= text.len() {
        if let Some((open, open_pos)) = unclosed_opener(text) {
            return parse_error(
                source,
                ErrorKind::UnclosedDelimiter { open },
                Span {
                    start: open_pos,
                    end: open_pos + 1,
                },
            );
        }
        return parse_error(
            source,
            ErrorKind::UnexpectedToken {
                expected: describe_rules(&positives),
                found: "end of input".into(),
            },
            Span { start, end },
        );
    }

    let found = text[start..].chars().next().unwrap(); // start < len, checked above
    let span = Span {
        start,
        end: end.max(start + found.len_utf8()),
    };

    if !is_grammar_char(found) {
        return parse_error(source, ErrorKind::InvalidCharacter { found }, span);
    }

    if positives.contains(&Rule::EOI) {
        return parse_error(
            source,
            ErrorKind::TrailingContent {
                found: snippet(&text[start..]),
            },
            span,
        );
    }

    parse_error(
        source,
        ErrorKind::UnexpectedToken {
            expected: describe_rules(&positives),
            found: format!("'{}'", found),
        },
        span,
    )
}

fn snippet(rest: &str) -> String {
    let cut: String = rest.chars().take(12).collect();
    if cut.len() < rest.len() {
        format!("{}...", cut.trim_end())
    } else {
        cut.trim_end().to_string()
    }
}

fn describe_rules(rules: &[Rule]) -> String {
    let mut names: Vec<&'static str> = rules.iter().map(rule_name).collect();
    names.dedup();
    if names.is_empty() {
        return "an expression".into();
    }
    names.join(" or ")
}

fn rule_name(rule: &Rule) -> &'static str {
    match rule {
        Rule::kv => "a key-value pair",
        Rule::kv_sep => "':' or '='",
        Rule::symbol => "a symbol",
        Rule::number => "a number",
        Rule::string => "a quoted string",
        Rule::call => "a call",
        Rule::paren_group => "a parenthesized group",
        Rule::bracket_group => "a bracketed group",
        Rule::brace_group => "a braced group",
        Rule::EOI => "end of input",
        _ => "an expression",
    }
}
