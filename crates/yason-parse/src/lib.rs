#![doc = include_str!("../README.md")]

pub use yason_tokenizer::{Matcher, Span, Token, TokenKind};

#[macro_use]
mod tracing_macros;

pub mod pattern;

pub mod engine;
pub use engine::{Advance, Context, Effect, Machine, Rule, StackOp, try_advance};

mod error;
pub use error::{NodeKind, ParseError, ParseErrorKind};

mod whitespace;
pub use whitespace::{Whitespace, split_off_lines};

mod literal;

mod key;
pub use key::KeyNode;

mod value;
pub use value::{Primitive, ValueNode};

mod block;
pub use block::BlockState;

mod map;
pub use map::{MapItem, MapNode};

mod list;
pub use list::{ListItem, ListNode};

mod document;
pub use document::{DocumentNode, DocumentState};

mod tree;
pub use tree::{Node, NodeId, Slot, Tree};

mod ast;
pub use ast::{DocumentAst, KeyAst, ListAst, ListItemAst, MapAst, MapItemAst, NodeAst, ValueAst};

mod parser;
pub use parser::{ParseOptions, parse, parse_with};

#[cfg(test)]
mod tests;
