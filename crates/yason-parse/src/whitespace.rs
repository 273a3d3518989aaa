//! Whitespace slots attached to syntax nodes.

use serde::Serialize;

/// Non-semantic text owned by a node: padding, comments and line breaks.
///
/// `before` and `after` surround the node's own text. `inner` sits between the
/// parts of a node that has two: a key and its colon, or a list dash and its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Whitespace {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub before: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub inner: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub after: String,
}

impl Whitespace {
    /// Whitespace with only `before` set.
    pub fn before(before: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.inner.is_empty() && self.after.is_empty()
    }
}

/// Split `text` at its first line break and return the tail.
///
/// `text` keeps everything on its own line; the returned tail starts with the line
/// break (`\n` or `\r\n`). Without a line break the tail is empty.
pub fn split_off_lines(text: &mut String) -> String {
    match text.find('\n') {
        Some(at) if text[..at].ends_with('\r') => text.split_off(at - 1),
        Some(at) => text.split_off(at),
        None => String::new(),
    }
}
