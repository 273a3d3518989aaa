//! Primitive values.

use serde_json::Number;
use yason_tokenizer::{Token, TokenKind};

use crate::ast::ValueAst;
use crate::error::{NodeKind, ParseError, ParseErrorKind};
use crate::key;
use crate::literal;
use crate::whitespace::Whitespace;

/// A decoded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Primitive {
    pub fn to_data(&self) -> serde_json::Value {
        match self {
            Primitive::Null => serde_json::Value::Null,
            Primitive::Bool(b) => serde_json::Value::Bool(*b),
            Primitive::Number(n) => serde_json::Value::Number(n.clone()),
            Primitive::String(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// A primitive value with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode {
    pub value: Primitive,
    /// The literal exactly as written.
    pub raw: String,
    pub whitespace: Whitespace,
}

impl ValueNode {
    /// Build a value from a primitive token.
    pub fn from_token(token: &Token<'_>) -> Result<Self, ParseError> {
        let value = match token.kind {
            TokenKind::True => Primitive::Bool(true),
            TokenKind::False => Primitive::Bool(false),
            TokenKind::Null => Primitive::Null,
            TokenKind::String => Primitive::String(key::decode(token)?),
            TokenKind::Number => {
                let number = literal::number(token.text).map_err(|reason| {
                    ParseError::new(ParseErrorKind::InvalidLiteral { reason }, token.span)
                })?;
                Primitive::Number(number)
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::Syntax {
                        node: NodeKind::Value,
                        state: "start",
                        found: format!("{:?}", token.kind),
                    },
                    token.span,
                ));
            }
        };
        Ok(Self {
            value,
            raw: token.text.to_owned(),
            whitespace: Whitespace::default(),
        })
    }

    pub fn to_data(&self) -> serde_json::Value {
        self.value.to_data()
    }

    pub fn to_ast(&self) -> ValueAst {
        ValueAst {
            whitespace: self.whitespace.clone(),
            value: self.to_data(),
            raw: self.raw.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yason_tokenizer::Span;

    fn value(kind: TokenKind, text: &str) -> Result<ValueNode, ParseError> {
        ValueNode::from_token(&Token::new(kind, Span::new(0, text.len() as u32), text))
    }

    #[test]
    fn test_keywords() {
        let node = value(TokenKind::True, "true").unwrap();
        assert_eq!(node.to_data(), json!(true));
        let node = value(TokenKind::False, "false").unwrap();
        assert_eq!(node.to_data(), json!(false));
        let node = value(TokenKind::Null, "null").unwrap();
        assert_eq!(node.to_data(), json!(null));
    }

    #[test]
    fn test_number_keeps_raw_text() {
        let node = value(TokenKind::Number, "01134").unwrap();
        assert_eq!(node.to_data(), json!(1134));
        assert_eq!(node.raw, "01134");
    }

    #[test]
    fn test_string() {
        let node = value(TokenKind::String, r#""tab\there""#).unwrap();
        assert_eq!(node.to_data(), json!("tab\there"));
    }

    #[test]
    fn test_invalid_literals() {
        let error = value(TokenKind::Number, "1e400").unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::InvalidLiteral { .. }));
        let error = value(TokenKind::String, r#""\udc00""#).unwrap_err();
        assert!(matches!(error.kind, ParseErrorKind::InvalidLiteral { .. }));
    }

    #[test]
    fn test_rejects_structural_tokens() {
        assert!(value(TokenKind::Dash, "-").is_err());
    }
}
