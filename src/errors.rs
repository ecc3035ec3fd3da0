//! Unfurl Error Handling - Unified Encapsulated API
//!
//! One error type covers the whole parse pipeline; callers never receive a
//! partially built tree alongside an error.

use miette::{Diagnostic, SourceSpan};
use miette::{LabeledSpan, NamedSource};
use std::fmt;
use std::sync::Arc;

use crate::syntax::Span;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Source context for error reporting: the input text under a display name,
/// attached to every diagnostic so miette can print the offending line.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_input(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// The single error type - no wrapper, no variants, just essential data
#[derive(Debug)]
pub struct UnfurlError {
    /// What went wrong (type-specific data)
    pub kind: ErrorKind,
    /// Where it happened (named source plus primary span)
    pub source_info: SourceInfo,
    /// How to help (auto-populated based on context)
    pub diagnostic_info: DiagnosticInfo,
}

/// All error types as a clean enum - no duplicate fields
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // Lexical errors - a character sequence matches no terminal
    UnterminatedString {
        quote: char,
    },
    InvalidCharacter {
        found: char,
    },

    // Structural errors - delimiters and expression shape
    UnclosedDelimiter {
        open: char,
    },
    UnexpectedToken {
        expected: String,
        found: String,
    },
    TrailingContent {
        found: String,
    },
    MalformedKey {
        found: String,
    },

    // Limit errors - defensive bounds
    NestingLimit {
        limit: usize,
    },
}

/// Context-specific source information
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: String,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

impl ErrorKind {
    /// Get the error category for test assertions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnterminatedString { .. } | Self::InvalidCharacter { .. } => {
                ErrorCategory::Lexical
            }

            Self::UnclosedDelimiter { .. }
            | Self::UnexpectedToken { .. }
            | Self::TrailingContent { .. }
            | Self::MalformedKey { .. } => ErrorCategory::Structural,

            Self::NestingLimit { .. } => ErrorCategory::Limit,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::UnterminatedString { .. } => "unterminated_string",
            Self::InvalidCharacter { .. } => "invalid_character",
            Self::UnclosedDelimiter { .. } => "unclosed_delimiter",
            Self::UnexpectedToken { .. } => "unexpected_token",
            Self::TrailingContent { .. } => "trailing_content",
            Self::MalformedKey { .. } => "malformed_key",
            Self::NestingLimit { .. } => "nesting_limit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Structural,
    Limit,
}

impl std::error::Error for UnfurlError {}

impl fmt::Display for UnfurlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::UnterminatedString { quote } => {
                write!(f, "Lexical error: unterminated {}-quoted string", quote)
            }
            ErrorKind::InvalidCharacter { found } => {
                write!(f, "Lexical error: invalid character '{}'", found)
            }
            ErrorKind::UnclosedDelimiter { open } => {
                write!(f, "Structural error: unclosed '{}'", open)
            }
            ErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "Structural error: expected {}, found {}", expected, found)
            }
            ErrorKind::TrailingContent { found } => {
                write!(
                    f,
                    "Structural error: trailing content '{}' after the expression",
                    found
                )
            }
            ErrorKind::MalformedKey { found } => {
                write!(f, "Structural error: malformed key {}", found)
            }
            ErrorKind::NestingLimit { limit } => {
                write!(f, "Limit error: nesting deeper than {} levels", limit)
            }
        }
    }
}

impl Diagnostic for UnfurlError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

impl UnfurlError {
    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::UnterminatedString { .. } => "string opened here".into(),
            ErrorKind::InvalidCharacter { .. } => "invalid character".into(),
            ErrorKind::UnclosedDelimiter { .. } => "opened here".into(),
            ErrorKind::UnexpectedToken { .. } => "unexpected token".into(),
            ErrorKind::TrailingContent { .. } => "trailing content starts here".into(),
            ErrorKind::MalformedKey { .. } => "not a usable key".into(),
            ErrorKind::NestingLimit { .. } => "nesting exceeds the limit here".into(),
        }
    }
}

/// Creates a properly contextualized UnfurlError for the parse phase.
pub fn parse_error(source: &SourceContext, kind: ErrorKind, span: Span) -> UnfurlError {
    let error_code = format!("unfurl::parse::{}", kind.code_suffix());
    let help = default_help(&kind);

    UnfurlError {
        kind,
        source_info: SourceInfo {
            source: source.to_named_source(),
            primary_span: to_source_span(span),
            phase: "parse".into(),
        },
        diagnostic_info: DiagnosticInfo { help, error_code },
    }
}

fn default_help(kind: &ErrorKind) -> Option<String> {
    match kind {
        ErrorKind::UnterminatedString { quote } => Some(format!(
            "add a closing {} (quotes cannot be escaped inside a same-quoted string)",
            quote
        )),
        ErrorKind::UnclosedDelimiter { open } => Some(format!("add the closer matching '{}'", open)),
        ErrorKind::NestingLimit { limit } => Some(format!(
            "expressions may nest at most {} delimiter levels deep",
            limit
        )),
        _ => None,
    }
}

/// Converts a syntax Span to a miette SourceSpan.
pub fn to_source_span(span: Span) -> miette::SourceSpan {
    miette::SourceSpan::from(span.start..span.end)
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints an UnfurlError with full miette diagnostics
///
/// This provides rich error formatting with source spans, suggestions, and
/// context. Use this for user-facing error display in the CLI.
pub fn print_error(error: UnfurlError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_partition_the_kinds() {
        assert_eq!(
            ErrorKind::UnterminatedString { quote: '\'' }.category(),
            ErrorCategory::Lexical
        );
        assert_eq!(
            ErrorKind::UnclosedDelimiter { open: '(' }.category(),
            ErrorCategory::Structural
        );
        assert_eq!(
            ErrorKind::NestingLimit { limit: 128 }.category(),
            ErrorCategory::Limit
        );
    }

    #[test]
    fn error_codes_carry_the_phase() {
        let source = SourceContext::from_input("test", "(foo");
        let err = parse_error(
            &source,
            ErrorKind::UnclosedDelimiter { open: '(' },
            Span { start: 0, end: 1 },
        );
        assert_eq!(
            err.diagnostic_info.error_code,
            "unfurl::parse::unclosed_delimiter"
        );
        assert_eq!(err.source_info.phase, "parse");
    }
}
