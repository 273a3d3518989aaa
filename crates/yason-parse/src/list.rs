//! Indentation-delimited lists.

use yason_tokenizer::{PRIMITIVE, Token};

use crate::block::{self, Block, BlockState};
use crate::engine::{Context, Effect, Machine, Rule};
use crate::error::{NodeKind, ParseError, ParseErrorKind};
use crate::pattern::{DASH, PADDING};
use crate::tree::{NodeId, Slot};
use crate::value::ValueNode;
use crate::whitespace::{Whitespace, split_off_lines};

/// A `- value` entry. `whitespace.inner` sits between the dash and the value.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub value: Slot,
    pub whitespace: Whitespace,
}

/// A list at a given nesting level.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub nesting: usize,
    pub state: BlockState,
    pub whitespace: Whitespace,
    pub items: Vec<ListItem>,
    /// Whitespace of an item whose dash has been read but whose value has not.
    pending: Option<Whitespace>,
}

impl ListNode {
    const BEFORE_INDENT: &'static [Rule<Self>] = &[
        Rule::new(block::INDENT, block::indent),
        Rule::fallback(block::unindented),
    ];
    const BEFORE_DASH: &'static [Rule<Self>] = &[Rule::new(&[DASH], Self::dash)];
    const BEFORE_VALUE: &'static [Rule<Self>] = &[
        Rule::new(&[PADDING, PRIMITIVE], Self::inline_value),
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

    /// Store a nested value for the pending dash.
    pub(crate) fn attach(&mut self, id: NodeId, cx: &Context) -> Result<(), ParseError> {
        let whitespace = self.take_pending(cx)?;
        self.items.push(ListItem {
            value: Slot::Nested(id),
            whitespace,
        });
        Ok(())
    }

    fn missing_item(&self, cx: &Context) -> ParseError {
        cx.error(ParseErrorKind::MissingItem {
            node: NodeKind::List,
            state: self.state_name(),
        })
    }

    fn take_pending(&mut self, cx: &Context) -> Result<Whitespace, ParseError> {
        match self.pending.take() {
            Some(whitespace) => Ok(whitespace),
            None => Err(self.missing_item(cx)),
        }
    }

    /// `[Dash]`
    fn dash(&mut self, _: &[Token<'_>], _: &mut Context) -> Result<Effect, ParseError> {
        let before = self
            .items
            .last_mut()
            .map(|item| split_off_lines(&mut item.whitespace.after))
            .unwrap_or_default();
        self.pending = Some(Whitespace::before(before));
        self.state = BlockState::BeforeValue;
        Ok(Effect::consume(1))
    }

    /// `[Padding, Primitive]`: the padding belongs to the item, not the value.
    fn inline_value(
        &mut self,
        tokens: &[Token<'_>],
        cx: &mut Context,
    ) -> Result<Effect, ParseError> {
        let value = ValueNode::from_token(&tokens[1])?;
        let mut whitespace = self.take_pending(cx)?;
        whitespace.inner = tokens[0].text.to_owned();
        self.items.push(ListItem {
            value: Slot::Value(value),
            whitespace,
        });
        self.state = BlockState::AfterValue;
        Ok(Effect::consume(2))
    }

    /// `[LineEnd?, Newline]`: the value starts on a later line. The newline is left
    /// for the nested value rules.
    fn line_break(&mut self, tokens: &[Token<'_>], cx: &mut Context) -> Result<Effect, ParseError> {
        let consumed = tokens.len() - 1;
        match self.pending.as_mut() {
            Some(whitespace) if consumed == 1 => whitespace.inner = tokens[0].text.to_owned(),
            Some(_) => {}
            None => return Err(self.missing_item(cx)),
        }
        self.state = BlockState::BeforeNestedValue;
        Ok(Effect::consume(consumed))
    }
}

impl Machine for ListNode {
    const KIND: NodeKind = NodeKind::List;

    fn rules(&self) -> &'static [Rule<Self>] {
        match self.state {
            BlockState::BeforeIndent => Self::BEFORE_INDENT,
            BlockState::BeforeItem => Self::BEFORE_DASH,
            BlockState::BeforeValue => Self::BEFORE_VALUE,
            BlockState::BeforeNestedValue => Self::BEFORE_NESTED_VALUE,
            BlockState::AfterValue => Self::AFTER_VALUE,
            BlockState::AfterNestedValue => Self::AFTER_NESTED_VALUE,
            BlockState::AfterItem => Self::AFTER_ITEM,
        }
    }

    fn state_name(&self) -> &'static str {
        self.state.name("beforeDash")
    }
}

impl Block for ListNode {
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
        self.pending.as_mut()
    }

    fn leading_mut(&mut self) -> &mut String {
        match self.items.last_mut() {
            Some(item) => &mut item.whitespace.after,
            None => &mut self.whitespace.before,
        }
    }
}
