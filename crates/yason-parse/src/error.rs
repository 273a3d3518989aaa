//! Parse errors and their diagnostic rendering.

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};
use yason_tokenizer::{Span, TokenizeError};

/// The grammar node an error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Map,
    List,
    Key,
    Value,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Document => "document",
            NodeKind::Map => "map",
            NodeKind::List => "list",
            NodeKind::Key => "key",
            NodeKind::Value => "value",
        })
    }
}

/// What went wrong while turning tokens into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The tokenizer could not recognize the input.
    UnexpectedToken { near: String },
    /// Indentation is not a whole multiple of the document's indent unit, skips a
    /// level, or mixes characters.
    InvalidIndent { found: String },
    /// The token sequence ended while a node still expected input.
    UnexpectedEndOfDocument { node: NodeKind, state: &'static str },
    /// The lookahead window reached its maximum length without any rule matching.
    Syntax {
        node: NodeKind,
        state: &'static str,
        found: String,
    },
    /// A rule claimed more tokens than its pattern matched.
    ConsumedExceedsMatched {
        node: NodeKind,
        state: &'static str,
        consumed: usize,
        matched: usize,
    },
    /// Tokens remain but no node is active.
    EmptyStack,
    /// A value arrived for an item that was never started.
    MissingItem { node: NodeKind, state: &'static str },
    /// A string or number literal could not be decoded.
    InvalidLiteral { reason: &'static str },
    /// Maps and lists are nested deeper than the configured limit.
    NestingTooDeep { limit: usize },
}

/// A parse error with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Source location.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Whether this error points at a bug in a grammar rule rather than at the input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::ConsumedExceedsMatched { .. }
                | ParseErrorKind::EmptyStack
                | ParseErrorKind::MissingItem { .. }
        )
    }

    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range: std::ops::Range<usize> = self.span.into();

        let (message, label, help): (&str, String, Option<&str>) = match &self.kind {
            ParseErrorKind::UnexpectedToken { near } => (
                "unexpected token",
                format!("no token starts with {near:?}"),
                Some("strings need double quotes and keys need a trailing ':'"),
            ),
            ParseErrorKind::InvalidIndent { found } => (
                "invalid indent",
                format!("indent {found:?} does not fit this level"),
                Some("indent each level by the same unit, using only spaces or only tabs"),
            ),
            ParseErrorKind::UnexpectedEndOfDocument { node, state } => (
                "unexpected end of document",
                format!("{node} ended in state {state}"),
                Some("a key without an inline value needs an indented value on the next line"),
            ),
            ParseErrorKind::Syntax { node, state, .. } => (
                "syntax error",
                format!("no {node} rule in state {state} matches here"),
                None,
            ),
            ParseErrorKind::ConsumedExceedsMatched {
                consumed, matched, ..
            } => (
                "internal parser error",
                format!("rule consumed {consumed} tokens but matched {matched}"),
                None,
            ),
            ParseErrorKind::EmptyStack => (
                "internal parser error",
                "no active node for these tokens".to_string(),
                None,
            ),
            ParseErrorKind::MissingItem { node, state } => (
                "internal parser error",
                format!("{node} has no item in state {state}"),
                None,
            ),
            ParseErrorKind::InvalidLiteral { reason } => (
                "invalid literal",
                reason.to_string(),
                Some("numbers must be finite and \\u escapes must form valid characters"),
            ),
            ParseErrorKind::NestingTooDeep { limit } => (
                "nesting too deep",
                format!("more than {limit} levels of maps and lists"),
                None,
            ),
        };

        let builder = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_message(message)
            .with_label(
                Label::new((filename, range))
                    .with_message(label)
                    .with_color(Color::Red),
            );
        match help {
            Some(help) => builder.with_help(help),
            None => builder,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { near } => write!(f, "unexpected token near {near:?}"),
            ParseErrorKind::InvalidIndent { found } => write!(f, "invalid indent {found:?}"),
            ParseErrorKind::UnexpectedEndOfDocument { node, state } => {
                write!(f, "unexpected end of document in {node} ({state})")
            }
            ParseErrorKind::Syntax { node, state, found } => {
                write!(f, "syntax error in {node} ({state}): found {found}")
            }
            ParseErrorKind::ConsumedExceedsMatched {
                node,
                state,
                consumed,
                matched,
            } => write!(
                f,
                "{node} ({state}) consumed {consumed} tokens but matched only {matched}"
            ),
            ParseErrorKind::EmptyStack => write!(f, "parse stack is empty"),
            ParseErrorKind::MissingItem { node, state } => {
                write!(f, "{node} ({state}) has no item under construction")
            }
            ParseErrorKind::InvalidLiteral { reason } => write!(f, "invalid literal: {reason}"),
            ParseErrorKind::NestingTooDeep { limit } => {
                write!(f, "nesting deeper than {limit} levels")
            }
        }?;
        write!(f, " at offset {}", self.span.start)
    }
}

impl std::error::Error for ParseError {}

impl From<TokenizeError> for ParseError {
    fn from(error: TokenizeError) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken { near: error.near },
            error.span,
        )
    }
}
