//! The document root.

use yason_tokenizer::{PRIMITIVE, Token};

use crate::engine::{Context, Effect, Machine, Rule};
use crate::error::{NodeKind, ParseError};
use crate::list::ListNode;
use crate::map::MapNode;
use crate::pattern::{
    BREAK_OR_END, DASH, END, KEY_COLON, LINE_END_OR_BREAK, NEWLINE, OPT_LINE_END,
};
use crate::tree::{NodeId, Slot};
use crate::value::ValueNode;
use crate::whitespace::Whitespace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentState {
    #[default]
    BeforeValue,
    AfterValue,
}

/// The root node. Holds exactly one value: a map, a list, or a primitive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentNode {
    pub state: DocumentState,
    pub whitespace: Whitespace,
    pub value: Option<Slot>,
}

impl DocumentNode {
    const BEFORE_VALUE: &'static [Rule<Self>] = &[
        Rule::new(KEY_COLON, Self::map),
        Rule::new(&[DASH], Self::list),
        Rule::new(&[PRIMITIVE, OPT_LINE_END, BREAK_OR_END], Self::primitive),
        Rule::new(&[OPT_LINE_END, NEWLINE], Self::leading),
    ];
    const AFTER_VALUE: &'static [Rule<Self>] = &[
        Rule::new(&[LINE_END_OR_BREAK], Self::trailing),
        Rule::new(&[END], Self::end),
    ];

    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&mut self, id: NodeId) {
        self.value = Some(Slot::Nested(id));
    }

    /// `[Key, Padding?, Colon]`: the key is left for the new map.
    fn map(&mut self, _: &[Token<'_>], _: &mut Context) -> Result<Effect, ParseError> {
        let mut map = MapNode::new(0);
        map.whitespace.before = std::mem::take(&mut self.whitespace.before);
        self.state = DocumentState::AfterValue;
        Ok(Effect::push(map, 0))
    }

    /// `[Dash]`: the dash is left for the new list.
    fn list(&mut self, _: &[Token<'_>], _: &mut Context) -> Result<Effect, ParseError> {
        let mut list = ListNode::new(0);
        list.whitespace.before = std::mem::take(&mut self.whitespace.before);
        self.state = DocumentState::AfterValue;
        Ok(Effect::push(list, 0))
    }

    /// `[Primitive, LineEnd?, Newline | End]`: a scalar document. Only the value
    /// itself is consumed.
    fn primitive(&mut self, tokens: &[Token<'_>], _: &mut Context) -> Result<Effect, ParseError> {
        let mut value = ValueNode::from_token(&tokens[0])?;
        value.whitespace.before = std::mem::take(&mut self.whitespace.before);
        self.value = Some(Slot::Value(value));
        self.state = DocumentState::AfterValue;
        Ok(Effect::consume(1))
    }

    /// `[LineEnd?, Newline]`: a blank or comment line before the value.
    fn leading(&mut self, tokens: &[Token<'_>], _: &mut Context) -> Result<Effect, ParseError> {
        for token in tokens {
            self.whitespace.before.push_str(token.text);
        }
        Ok(Effect::consume(tokens.len()))
    }

    fn trailing(&mut self, tokens: &[Token<'_>], _: &mut Context) -> Result<Effect, ParseError> {
        self.whitespace.after.push_str(tokens[0].text);
        Ok(Effect::consume(1))
    }

    fn end(&mut self, _: &[Token<'_>], _: &mut Context) -> Result<Effect, ParseError> {
        Ok(Effect::pop(1))
    }
}

impl Machine for DocumentNode {
    const KIND: NodeKind = NodeKind::Document;

    fn rules(&self) -> &'static [Rule<Self>] {
        match self.state {
            DocumentState::BeforeValue => Self::BEFORE_VALUE,
            DocumentState::AfterValue => Self::AFTER_VALUE,
        }
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            DocumentState::BeforeValue => "beforeValue",
            DocumentState::AfterValue => "afterValue",
        }
    }
}
