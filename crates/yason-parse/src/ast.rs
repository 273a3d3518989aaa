//! The lossless syntax tree.
//!
//! Every character of the source lands in exactly one place: a raw literal, a
//! structural `:` or `-` implied by the node type, or a whitespace slot. Printing a
//! [`DocumentAst`] with [`Display`](fmt::Display) gives back the original text.

use std::fmt;

use serde::Serialize;

use crate::whitespace::Whitespace;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentAst {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<String>,
    pub whitespace: Whitespace,
    pub value: NodeAst,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeAst {
    Map(MapAst),
    List(ListAst),
    Value(ValueAst),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapAst {
    pub whitespace: Whitespace,
    pub items: Vec<MapItemAst>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapItemAst {
    pub whitespace: Whitespace,
    pub key: KeyAst,
    pub value: NodeAst,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyAst {
    pub whitespace: Whitespace,
    pub symbol: bool,
    pub value: String,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListAst {
    pub whitespace: Whitespace,
    pub items: Vec<ListItemAst>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItemAst {
    pub whitespace: Whitespace,
    pub value: NodeAst,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAst {
    pub whitespace: Whitespace,
    pub value: serde_json::Value,
    pub raw: String,
}

impl fmt::Display for DocumentAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.whitespace.before, self.value, self.whitespace.after
        )
    }
}

impl fmt::Display for NodeAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeAst::Map(map) => fmt::Display::fmt(map, f),
            NodeAst::List(list) => fmt::Display::fmt(list, f),
            NodeAst::Value(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl fmt::Display for MapAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.whitespace.before)?;
        for item in &self.items {
            write!(f, "{item}")?;
        }
        f.write_str(&self.whitespace.after)
    }
}

impl fmt::Display for MapItemAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.whitespace.before, self.key, self.value, self.whitespace.after
        )
    }
}

impl fmt::Display for KeyAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}:{}",
            self.whitespace.before, self.raw, self.whitespace.inner, self.whitespace.after
        )
    }
}

impl fmt::Display for ListAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.whitespace.before)?;
        for item in &self.items {
            write!(f, "{item}")?;
        }
        f.write_str(&self.whitespace.after)
    }
}

impl fmt::Display for ListItemAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}{}{}",
            self.whitespace.before, self.whitespace.inner, self.value, self.whitespace.after
        )
    }
}

impl fmt::Display for ValueAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.whitespace.before, self.raw, self.whitespace.after
        )
    }
}
