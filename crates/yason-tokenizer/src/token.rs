//! Token types for the yason tokenizer.

use crate::Span;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keyword literals
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,

    // Variable-text literals
    /// JSON-style number: `-3.142`, `1E5`, `.5`
    Number,
    /// Double-quoted string with JSON escapes: `"hello\n"`
    String,
    /// Bare word directly followed by a colon: `port` in `port: 80`
    Symbol,

    // Punctuation
    /// `:`
    Colon,
    /// `-`
    Dash,
    /// `,`
    Comma,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,

    // Layout
    /// Trailing spaces/tabs and an optional `# comment` up to the line break.
    LineEnd,
    /// Spaces and tabs followed by more content on the same line.
    Padding,
    /// `\n` or `\r\n`
    Newline,

    /// End of input sentinel. Carries no text.
    End,
}

/// A token with its kind, span, and source text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in the source text.
    pub span: Span,
    /// The source text of this token.
    pub text: &'src str,
}

impl<'src> Token<'src> {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: &'src str) -> Self {
        Self { kind, span, text }
    }
}

/// One element of a grammar pattern.
///
/// Matchers never come out of the tokenizer; they only describe what a grammar rule
/// expects at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Exactly this kind of token.
    Kind(TokenKind),
    /// Any of these kinds.
    OneOf(&'static [TokenKind]),
    /// The wrapped matcher, or nothing at all.
    Optional(&'static Matcher),
}

/// Any primitive value token.
pub const PRIMITIVE: Matcher = Matcher::OneOf(&[
    TokenKind::True,
    TokenKind::False,
    TokenKind::Null,
    TokenKind::Number,
    TokenKind::String,
]);

impl Matcher {
    /// Whether `token` satisfies this matcher.
    pub fn matches(&self, token: &Token<'_>) -> bool {
        match self {
            Matcher::Kind(kind) => token.kind == *kind,
            Matcher::OneOf(kinds) => kinds.contains(&token.kind),
            Matcher::Optional(inner) => inner.matches(token),
        }
    }

    /// Whether a pattern may skip this element.
    pub fn is_optional(&self) -> bool {
        matches!(self, Matcher::Optional(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind) -> Token<'static> {
        Token::new(kind, Span::empty(0), "")
    }

    #[test]
    fn test_kind_matcher() {
        let colon = Matcher::Kind(TokenKind::Colon);
        assert!(colon.matches(&token(TokenKind::Colon)));
        assert!(!colon.matches(&token(TokenKind::Dash)));
        assert!(!colon.is_optional());
    }

    #[test]
    fn test_one_of_matcher() {
        assert!(PRIMITIVE.matches(&token(TokenKind::Null)));
        assert!(PRIMITIVE.matches(&token(TokenKind::String)));
        assert!(!PRIMITIVE.matches(&token(TokenKind::Symbol)));
    }

    #[test]
    fn test_optional_matcher() {
        const PADDING: Matcher = Matcher::Kind(TokenKind::Padding);
        let optional = Matcher::Optional(&PADDING);
        assert!(optional.is_optional());
        assert!(optional.matches(&token(TokenKind::Padding)));
        assert!(!optional.matches(&token(TokenKind::Newline)));
    }
}
