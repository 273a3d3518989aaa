#![doc = include_str!("../README.md")]
//!
//! # Decoding Example
//!
//! ```
//! use serde_json::json;
//!
//! let source = "name: \"gateway\"\nupstreams:\n  - \"10.0.0.1\"\n  - \"10.0.0.2\"\n";
//! let data = yason::decode(source).unwrap();
//! assert_eq!(data, json!({ "name": "gateway", "upstreams": ["10.0.0.1", "10.0.0.2"] }));
//! ```
//!
//! # Lossless Example
//!
//! ```
//! let source = "# ports\nhttp: 80 # default\n\nhttps: 443\n";
//! let ast = yason::decode_ast(source).unwrap();
//! assert_eq!(ast.to_string(), source);
//! ```

mod error;

pub use error::{Error, Result};
pub use yason_parse::{
    DocumentAst, KeyAst, ListAst, ListItemAst, MapAst, MapItemAst, NodeAst, ParseError,
    ParseErrorKind, ParseOptions, Tree, ValueAst, Whitespace,
};
pub use yason_tokenizer::{Span, Token, TokenKind, tokenize};

/// Tokenize and parse a document.
pub fn parse(source: &str) -> std::result::Result<Tree, ParseError> {
    parse_with(source, &ParseOptions::default())
}

/// Tokenize and parse a document with custom options.
pub fn parse_with(source: &str, options: &ParseOptions) -> std::result::Result<Tree, ParseError> {
    let tokens = tokenize(source)?;
    yason_parse::parse_with(&tokens, options)
}

/// Decode a document into plain data.
///
/// When a map repeats a key, the last value wins but keeps the position of the first.
pub fn decode(source: &str) -> std::result::Result<serde_json::Value, ParseError> {
    Ok(parse(source)?.to_data())
}

/// Decode a document into its lossless syntax tree.
pub fn decode_ast(source: &str) -> std::result::Result<DocumentAst, ParseError> {
    Ok(parse(source)?.to_ast())
}

/// Deserialize a value from a yason string.
///
/// # Example
///
/// ```
/// use serde::Deserialize;
/// use yason::from_str;
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let source = "name: \"Alice\"\nage: 30";
/// let person: Person = from_str(source).unwrap();
/// assert_eq!(person.name, "Alice");
/// assert_eq!(person.age, 30);
/// ```
pub fn from_str<T>(source: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let data = decode(source)?;
    Ok(serde_json::from_value(data)?)
}
