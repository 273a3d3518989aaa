#![doc = include_str!("../README.md")]

mod span;
pub use span::Span;

mod token;
pub use token::{Matcher, PRIMITIVE, Token, TokenKind};

mod tokenizer;
pub use tokenizer::{TokenizeError, Tokenizer, tokenize};
