//! The parsed tree: an arena of maps and lists under a document root.

use crate::ast::{DocumentAst, ListAst, ListItemAst, MapAst, MapItemAst, NodeAst};
use crate::engine::{Advance, Context, Machine, try_advance};
use crate::error::{NodeKind, ParseError};
use crate::list::ListNode;
use crate::map::MapNode;
use crate::value::ValueNode;
use crate::whitespace::Whitespace;
use yason_tokenizer::Token;

/// Index of a map or list in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Where an item's value lives.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Value(ValueNode),
    Nested(NodeId),
}

/// A map or list stored in the arena.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Map(MapNode),
    List(ListNode),
}

impl From<MapNode> for Node {
    fn from(map: MapNode) -> Self {
        Node::Map(map)
    }
}

impl From<ListNode> for Node {
    fn from(list: ListNode) -> Self {
        Node::List(list)
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Map(_) => NodeKind::Map,
            Node::List(_) => NodeKind::List,
        }
    }

    pub fn nesting(&self) -> usize {
        match self {
            Node::Map(map) => map.nesting,
            Node::List(list) => list.nesting,
        }
    }

    pub fn whitespace(&self) -> &Whitespace {
        match self {
            Node::Map(map) => &map.whitespace,
            Node::List(list) => &list.whitespace,
        }
    }

    pub(crate) fn state_name(&self) -> &'static str {
        match self {
            Node::Map(map) => map.state_name(),
            Node::List(list) => list.state_name(),
        }
    }

    pub(crate) fn matchable_tokens(&self) -> usize {
        match self {
            Node::Map(map) => map.matchable_tokens(),
            Node::List(list) => list.matchable_tokens(),
        }
    }

    pub(crate) fn try_advance(
        &mut self,
        window: &[Token<'_>],
        cx: &mut Context,
    ) -> Result<Advance, ParseError> {
        match self {
            Node::Map(map) => try_advance(map, window, cx),
            Node::List(list) => try_advance(list, window, cx),
        }
    }

    pub(crate) fn attach(&mut self, id: NodeId, cx: &Context) -> Result<(), ParseError> {
        match self {
            Node::Map(map) => map.attach(id, cx),
            Node::List(list) => list.attach(id, cx),
        }
    }
}

/// A fully parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub(crate) whitespace: Whitespace,
    pub(crate) value: Slot,
    pub(crate) nodes: Vec<Node>,
    pub(crate) indent: Option<String>,
}

impl Tree {
    /// The indent unit, if any line was indented.
    pub fn indent(&self) -> Option<&str> {
        self.indent.as_deref()
    }

    /// Whitespace before and after the root value.
    pub fn whitespace(&self) -> &Whitespace {
        &self.whitespace
    }

    pub fn root(&self) -> &Slot {
        &self.value
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The plain data the document describes.
    ///
    /// When a map repeats a key, the last value wins but the key keeps the position
    /// of its first occurrence.
    pub fn to_data(&self) -> serde_json::Value {
        self.slot_data(&self.value)
    }

    fn slot_data(&self, slot: &Slot) -> serde_json::Value {
        let id = match slot {
            Slot::Value(value) => return value.to_data(),
            Slot::Nested(id) => *id,
        };
        match self.node(id) {
            Node::Map(map) => serde_json::Value::Object(
                map.items
                    .iter()
                    .map(|item| (item.key.value.clone(), self.slot_data(&item.value)))
                    .collect(),
            ),
            Node::List(list) => serde_json::Value::Array(
                list.items
                    .iter()
                    .map(|item| self.slot_data(&item.value))
                    .collect(),
            ),
        }
    }

    /// The lossless syntax tree.
    pub fn to_ast(&self) -> DocumentAst {
        DocumentAst {
            indent: self.indent.clone(),
            whitespace: self.whitespace.clone(),
            value: self.slot_ast(&self.value),
        }
    }

    fn slot_ast(&self, slot: &Slot) -> NodeAst {
        let id = match slot {
            Slot::Value(value) => return NodeAst::Value(value.to_ast()),
            Slot::Nested(id) => *id,
        };
        match self.node(id) {
            Node::Map(map) => NodeAst::Map(MapAst {
                whitespace: map.whitespace.clone(),
                items: map
                    .items
                    .iter()
                    .map(|item| MapItemAst {
                        whitespace: item.whitespace.clone(),
                        key: item.key.to_ast(),
                        value: self.slot_ast(&item.value),
                    })
                    .collect(),
            }),
            Node::List(list) => NodeAst::List(ListAst {
                whitespace: list.whitespace.clone(),
                items: list
                    .items
                    .iter()
                    .map(|item| ListItemAst {
                        whitespace: item.whitespace.clone(),
                        value: self.slot_ast(&item.value),
                    })
                    .collect(),
            }),
        }
    }

    /// The source text, rebuilt from the syntax tree.
    pub fn to_source(&self) -> String {
        self.to_ast().to_string()
    }
}
