//! Map keys.

use yason_tokenizer::{Token, TokenKind};

use crate::ast::KeyAst;
use crate::error::{NodeKind, ParseError, ParseErrorKind};
use crate::literal;
use crate::whitespace::Whitespace;

/// A map key: a quoted string or a bare symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNode {
    /// The decoded key.
    pub value: String,
    /// Whether the key was written as a bare symbol.
    pub symbol: bool,
    /// The key exactly as written.
    pub raw: String,
    /// `before` is unused, `inner` sits between the key and its colon, `after`
    /// follows the colon.
    pub whitespace: Whitespace,
}

impl KeyNode {
    /// Build a key from a `String` or `Symbol` token.
    pub fn from_token(token: &Token<'_>) -> Result<Self, ParseError> {
        let (value, symbol) = match token.kind {
            TokenKind::String => (decode(token)?, false),
            TokenKind::Symbol => (token.text.to_owned(), true),
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::Syntax {
                        node: NodeKind::Key,
                        state: "start",
                        found: format!("{:?}", token.kind),
                    },
                    token.span,
                ));
            }
        };
        Ok(Self {
            value,
            symbol,
            raw: token.text.to_owned(),
            whitespace: Whitespace::default(),
        })
    }

    pub fn to_ast(&self) -> KeyAst {
        KeyAst {
            whitespace: self.whitespace.clone(),
            symbol: self.symbol,
            value: self.value.clone(),
            raw: self.raw.clone(),
        }
    }
}

pub(crate) fn decode(token: &Token<'_>) -> Result<String, ParseError> {
    literal::unescape(token.text)
        .map_err(|reason| ParseError::new(ParseErrorKind::InvalidLiteral { reason }, token.span))
}
