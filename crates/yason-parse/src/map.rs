//! Indentation-delimited maps.

use yason_tokenizer::{PRIMITIVE, Token};

use crate::block::{self, Block, BlockState};
use crate::engine::{Context, Effect, Machine, Rule};
use crate::error::{NodeKind, ParseError, ParseErrorKind};
use crate::key::KeyNode;
use crate::pattern::{KEY_COLON, OPT_PADDING};
use crate::tree::{NodeId, Slot};
use crate::value::ValueNode;
use crate::whitespace::{Whitespace, split_off_lines};

/// A `key: value` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MapItem {
    pub key: KeyNode,
    pub value: Slot,
    pub whitespace: Whitespace,
}

/// An item whose key has been read but whose value has not.
#[derive(Debug, Clone, PartialEq)]
struct PendingKey {
    key: KeyNode,
    whitespace: Whitespace,
}

/// A map at a given nesting level.
#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    pub nesting: usize,
    pub state: BlockState,
    pub whitespace: Whitespace,
    /// Items in source order. Duplicate keys are all kept here; only the data view
    /// collapses them.
    pub items: Vec<MapItem>,
    pending: Option<PendingKey>,
}

impl MapNode {
    const BEFORE_INDENT: &'static [Rule<Self>] = &[
        Rule::new(block::INDENT, block::indent),
        Rule::fallback(block::unindented),
    ];
    const BEFORE_KEY: &'static [Rule<Self>] = &[Rule::new(KEY_COLON, Self::key)];
    const BEFORE_VALUE: &'static [Rule<Self>] = &[
        Rule::new(&[OPT_PADDING, PRIMITIVE], Self::inline_value),
        Rule::new(block::OPEN_NESTED, Self::line_break),
    ];
    const BEFORE_NESTED_VALUE: &'static [Rule<Self>] = &[
        Rule::new(block::NESTED_MAP, block::nested_map),
        Rule::new(block::NESTED_LIST, block::nested_list),
        Rule::new(block::BLANK_LINE, block::blank_before_nested),
    ];
    const AFTER_VALUE: &'static [Rule<Self>] = &[
        Rule::new(block::TRAILING, block::trailing),
        Rule::fallback(block::end_item),
    ];
    const AFTER_NESTED_VALUE: &'static [Rule<Self>] = &[Rule::fallback(block::end_item)];
    const AFTER_ITEM: &'static [Rule<Self>] = &[
        Rule::new(block::ITEM_LINE, block::next_line),
        Rule::new(block::BLANK_LINE, block::blank_after_item),
        Rule::new(block::LAST_LINE, block::close_after_last_line),
        Rule::new(block::END_OF_DOCUMENT, block::close_at_end),
    ];

    pub fn new(nesting: usize) -> Self {
        Self {
            nesting,
            state: BlockState::BeforeIndent,
            whitespace: Whitespace::default(),
            items: Vec::new(),
            pending: None,
        }
    }

    /// Store a nested value for the pending key.
    pub(crate) fn attach(&mut self, id: NodeId, cx: &Context) -> Result<(), ParseError> {
        let pending = self.take_pending(cx)?;
        self.items.push(MapItem {
            key: pending.key,
            value: Slot::Nested(id),
            whitespace: pending.whitespace,
        });
        Ok(())
    }

    fn take_pending(&mut self, cx: &Context) -> Result<PendingKey, ParseError> {
        self.pending.take().ok_or_else(|| {
            cx.error(ParseErrorKind::MissingItem {
                node: NodeKind::Map,
                state: self.state_name(),
            })
        })
    }

    /// `[Key, Padding?, Colon]`
    fn key(&mut self, tokens: &[Token<'_>], _: &mut Context) -> Result<Effect, ParseError> {
        let mut key = KeyNode::from_token(&tokens[0])?;
        key.whitespace.inner = block::leading_padding(&tokens[1..]).to_owned();
        let before = self
            .items
            .last_mut()
            .map(|item| split_off_lines(&mut item.whitespace.after))
            .unwrap_or_default();
        self.pending = Some(PendingKey {
            key,
            whitespace: Whitespace::before(before),
        });
        self.state = BlockState::BeforeValue;
        Ok(Effect::consume(tokens.len()))
    }

    /// `[Padding?, Primitive]`
    fn inline_value(
        &mut self,
        tokens: &[Token<'_>],
        cx: &mut Context,
    ) -> Result<Effect, ParseError> {
        let mut value = ValueNode::from_token(&tokens[tokens.len() - 1])?;
        value.whitespace.before = block::leading_padding(tokens).to_owned();
        let pending = self.take_pending(cx)?;
        self.items.push(MapItem {
            key: pending.key,
            value: Slot::Value(value),
            whitespace: pending.whitespace,
        });
        self.state = BlockState::AfterValue;
        Ok(Effect::consume(tokens.len()))
    }

    /// `[LineEnd?, Newline]`: the value starts on a later line. The newline is left
    /// for the nested value rules.
    fn line_break(&mut self, tokens: &[Token<'_>], cx: &mut Context) -> Result<Effect, ParseError> {
        let consumed = tokens.len() - 1;
        let state = self.state_name();
        let pending = self.pending.as_mut().ok_or_else(|| {
            cx.error(ParseErrorKind::MissingItem {
                node: NodeKind::Map,
                state,
            })
        })?;
        if consumed == 1 {
            pending.key.whitespace.after = tokens[0].text.to_owned();
        }
        self.state = BlockState::BeforeNestedValue;
        Ok(Effect::consume(consumed))
    }
}

impl Machine for MapNode {
    const KIND: NodeKind = NodeKind::Map;

    fn rules(&self) -> &'static [Rule<Self>] {
        match self.state {
            BlockState::BeforeIndent => Self::BEFORE_INDENT,
            BlockState::BeforeItem => Self::BEFORE_KEY,
            BlockState::BeforeValue => Self::BEFORE_VALUE,
            BlockState::BeforeNestedValue => Self::BEFORE_NESTED_VALUE,
            BlockState::AfterValue => Self::AFTER_VALUE,
            BlockState::AfterNestedValue => Self::AFTER_NESTED_VALUE,
            BlockState::AfterItem => Self::AFTER_ITEM,
        }
    }

    fn state_name(&self) -> &'static str {
        self.state.name("beforeKey")
    }
}

impl Block for MapNode {
    fn nesting(&self) -> usize {
        self.nesting
    }

    fn set_state(&mut self, state: BlockState) {
        self.state = state;
    }

    fn whitespace_mut(&mut self) -> &mut Whitespace {
        &mut self.whitespace
    }

    fn last_after_mut(&mut self) -> Option<&mut String> {
        self.items.last_mut().map(|item| &mut item.whitespace.after)
    }

    fn pending_mut(&mut self) -> Option<&mut Whitespace> {
        self.pending.as_mut().map(|pending| &mut pending.whitespace)
    }

    fn leading_mut(&mut self) -> &mut String {
        match self.items.last_mut() {
            Some(item) => &mut item.whitespace.after,
            None => &mut self.whitespace.before,
        }
    }
}
