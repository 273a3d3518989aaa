//! Behavior shared by maps and lists.
//!
//! Both are indentation-delimited blocks of items at a fixed nesting level and walk
//! the same states. They differ only in how an item starts (`key:` or `-`) and where
//! the whitespace between an item's start and its value is kept.

use yason_tokenizer::{Matcher, Token, TokenKind};

use crate::engine::{Context, Effect, Machine};
use crate::error::{ParseError, ParseErrorKind};
use crate::list::ListNode;
use crate::map::MapNode;
use crate::pattern::{
    COLON, DASH, END, ITEM_START, KEY, LINE_END, NEWLINE, OPT_LINE_END, OPT_PADDING, PADDING,
};
use crate::whitespace::{Whitespace, split_off_lines};

/// Indentation at the start of an item line.
pub(crate) const INDENT: &[Matcher] = &[PADDING];
/// An optional comment, then the line break before a nested value.
pub(crate) const OPEN_NESTED: &[Matcher] = &[OPT_LINE_END, NEWLINE];
/// First line of a nested map.
pub(crate) const NESTED_MAP: &[Matcher] = &[NEWLINE, PADDING, KEY, OPT_PADDING, COLON];
/// First line of a nested list.
pub(crate) const NESTED_LIST: &[Matcher] = &[NEWLINE, PADDING, DASH];
/// A blank or comment-only line.
pub(crate) const BLANK_LINE: &[Matcher] = &[NEWLINE, OPT_LINE_END, NEWLINE];
/// A blank or comment-only line that ends the document.
pub(crate) const LAST_LINE: &[Matcher] = &[NEWLINE, OPT_LINE_END, END];
/// A line that starts another item, here or in an ancestor.
pub(crate) const ITEM_LINE: &[Matcher] = &[NEWLINE, OPT_PADDING, ITEM_START];
/// A comment after an inline value.
pub(crate) const TRAILING: &[Matcher] = &[LINE_END];
pub(crate) const END_OF_DOCUMENT: &[Matcher] = &[END];

/// States of a map or list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// At the start of an item line, before its indentation.
    BeforeIndent,
    /// Before the key or dash.
    BeforeItem,
    /// After the key or dash.
    BeforeValue,
    /// The value starts on a following line.
    BeforeNestedValue,
    /// After an inline value.
    AfterValue,
    /// After a nested value was popped.
    AfterNestedValue,
    /// The item is complete.
    AfterItem,
}

impl BlockState {
    pub(crate) fn name(self, item: &'static str) -> &'static str {
        match self {
            BlockState::BeforeIndent => "beforeIndent",
            BlockState::BeforeItem => item,
            BlockState::BeforeValue => "beforeValue",
            BlockState::BeforeNestedValue => "beforeNestedValue",
            BlockState::AfterValue => "afterValue",
            BlockState::AfterNestedValue => "afterNestedValue",
            BlockState::AfterItem => "afterItem",
        }
    }
}

/// Access a map or list needs to give the shared rules.
pub(crate) trait Block: Machine {
    fn nesting(&self) -> usize;
    fn set_state(&mut self, state: BlockState);
    fn whitespace_mut(&mut self) -> &mut Whitespace;
    /// `after` of the last complete item.
    fn last_after_mut(&mut self) -> Option<&mut String>;
    /// Whitespace of the item whose value has not arrived yet.
    fn pending_mut(&mut self) -> Option<&mut Whitespace>;

    /// Where indentation before the next item goes: the last item's `after`, or the
    /// block's own `before` while it has no items.
    fn leading_mut(&mut self) -> &mut String;
}

fn missing_item<N: Block>(node: &N, cx: &Context) -> ParseError {
    cx.error(ParseErrorKind::MissingItem {
        node: N::KIND,
        state: node.state_name(),
    })
}

fn text(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|token| token.text).collect()
}

/// Padding at the start of `tokens`, if the pattern had an optional one.
pub(crate) fn leading_padding<'src>(tokens: &[Token<'src>]) -> &'src str {
    match tokens.first() {
        Some(token) if token.kind == TokenKind::Padding => token.text,
        _ => "",
    }
}

/// The pending item's `after` moved out for a nested node.
fn take_pending_after<N: Block>(node: &mut N, cx: &Context) -> Result<String, ParseError> {
    match node.pending_mut() {
        Some(whitespace) => Ok(std::mem::take(&mut whitespace.after)),
        None => Err(missing_item(node, cx)),
    }
}

fn push_last_after<N: Block>(node: &mut N, cx: &Context, text: &str) -> Result<(), ParseError> {
    match node.last_after_mut() {
        Some(after) => {
            after.push_str(text);
            Ok(())
        }
        None => Err(missing_item(node, cx)),
    }
}

/// Move whatever follows the last item's own line into the block's `after`.
fn close<N: Block>(node: &mut N, cx: &Context) -> Result<(), ParseError> {
    let moved = match node.last_after_mut() {
        Some(after) => split_off_lines(after),
        None => return Err(missing_item(node, cx)),
    };
    node.whitespace_mut().after.push_str(&moved);
    Ok(())
}

/// Check item indentation against the document's indent unit, fixing the unit on
/// the first indented line.
fn check_indent(cx: &mut Context, nesting: usize, padding: &Token<'_>) -> Result<(), ParseError> {
    let ok = match &cx.indent {
        Some(unit) => padding.text == unit.repeat(nesting),
        None if nesting == 1 && is_uniform(padding.text) => {
            debug!("indent unit is {:?}", padding.text);
            cx.indent = Some(padding.text.to_owned());
            true
        }
        None => false,
    };
    if ok {
        Ok(())
    } else {
        Err(ParseError::new(
            ParseErrorKind::InvalidIndent {
                found: padding.text.to_owned(),
            },
            padding.span,
        ))
    }
}

fn is_uniform(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|first| chars.all(|c| c == first))
}

/// Nesting level that `padding` indents to, if it is a whole number of units.
fn indent_depth(cx: &Context, padding: &str) -> Option<usize> {
    if padding.is_empty() {
        return Some(0);
    }
    let unit = cx.indent.as_deref()?;
    let depth = padding.len() / unit.len();
    (padding.len() % unit.len() == 0 && unit.repeat(depth) == padding).then_some(depth)
}

/// `[Padding]`: indentation of an item line.
pub(crate) fn indent<N: Block>(
    node: &mut N,
    tokens: &[Token<'_>],
    cx: &mut Context,
) -> Result<Effect, ParseError> {
    let padding = &tokens[0];
    check_indent(cx, node.nesting(), padding)?;
    node.leading_mut().push_str(padding.text);
    node.set_state(BlockState::BeforeItem);
    Ok(Effect::consume(1))
}

/// No indentation, which only a top-level block accepts.
pub(crate) fn unindented<N: Block>(
    node: &mut N,
    _: &[Token<'_>],
    cx: &mut Context,
) -> Result<Effect, ParseError> {
    if node.nesting() > 0 {
        return Err(cx.error(ParseErrorKind::InvalidIndent {
            found: String::new(),
        }));
    }
    node.set_state(BlockState::BeforeItem);
    Ok(Effect::epsilon())
}

/// Leading whitespace for a nested value that starts at `newline`.
fn open_nested<N: Block>(
    node: &mut N,
    newline: &Token<'_>,
    cx: &Context,
) -> Result<String, ParseError> {
    let before = take_pending_after(node, cx)? + newline.text;
    node.set_state(BlockState::AfterNestedValue);
    Ok(before)
}

/// `[Newline, Padding, Key, Padding?, Colon]`: the value is a map on the next line.
pub(crate) fn nested_map<N: Block>(
    node: &mut N,
    tokens: &[Token<'_>],
    cx: &mut Context,
) -> Result<Effect, ParseError> {
    debug!(
        "{} at nesting {} opens a nested map",
        N::KIND,
        node.nesting()
    );
    let mut child = MapNode::new(node.nesting() + 1);
    child.whitespace.before = open_nested(node, &tokens[0], cx)?;
    Ok(Effect::push(child, 1))
}

/// `[Newline, Padding, Dash]`: the value is a list on the next line.
pub(crate) fn nested_list<N: Block>(
    node: &mut N,
    tokens: &[Token<'_>],
    cx: &mut Context,
) -> Result<Effect, ParseError> {
    debug!(
        "{} at nesting {} opens a nested list",
        N::KIND,
        node.nesting()
    );
    let mut child = ListNode::new(node.nesting() + 1);
    child.whitespace.before = open_nested(node, &tokens[0], cx)?;
    Ok(Effect::push(child, 1))
}

/// `[Newline, LineEnd?, Newline]` before a nested value.
pub(crate) fn blank_before_nested<N: Block>(
    node: &mut N,
    tokens: &[Token<'_>],
    cx: &mut Context,
) -> Result<Effect, ParseError> {
    let consumed = tokens.len() - 1;
    match node.pending_mut() {
        Some(whitespace) => whitespace.after.push_str(&text(&tokens[..consumed])),
        None => return Err(missing_item(node, cx)),
    }
    Ok(Effect::consume(consumed))
}

/// `[LineEnd]`: a comment after an inline value.
pub(crate) fn trailing<N: Block>(
    node: &mut N,
    tokens: &[Token<'_>],
    cx: &mut Context,
) -> Result<Effect, ParseError> {
    push_last_after(node, cx, tokens[0].text)?;
    node.set_state(BlockState::AfterItem);
    Ok(Effect::consume(1))
}

pub(crate) fn end_item<N: Block>(
    node: &mut N,
    _: &[Token<'_>],
    _: &mut Context,
) -> Result<Effect, ParseError> {
    node.set_state(BlockState::AfterItem);
    Ok(Effect::epsilon())
}

/// `[Newline, Padding?, Key | Dash]`: a sibling item, or the end of this block when
/// the line belongs to an ancestor.
pub(crate) fn next_line<N: Block>(
    node: &mut N,
    tokens: &[Token<'_>],
    cx: &mut Context,
) -> Result<Effect, ParseError> {
    let padding = leading_padding(&tokens[1..]);
    match indent_depth(cx, padding) {
        Some(depth) if depth == node.nesting() => {
            push_last_after(node, cx, tokens[0].text)?;
            node.set_state(BlockState::BeforeIndent);
            Ok(Effect::consume(1))
        }
        Some(depth) if depth < node.nesting() => {
            trace!(
                "{} at nesting {} closes before depth {}",
                N::KIND,
                node.nesting(),
                depth
            );
            close(node, cx)?;
            Ok(Effect::pop(0))
        }
        _ => Err(ParseError::new(
            ParseErrorKind::InvalidIndent {
                found: padding.to_owned(),
            },
            tokens[1].span,
        )),
    }
}

/// `[Newline, LineEnd?, Newline]` between items.
pub(crate) fn blank_after_item<N: Block>(
    node: &mut N,
    tokens: &[Token<'_>],
    cx: &mut Context,
) -> Result<Effect, ParseError> {
    let consumed = tokens.len() - 1;
    push_last_after(node, cx, &text(&tokens[..consumed]))?;
    Ok(Effect::consume(consumed))
}

/// `[Newline, LineEnd?, End]`: the last line of the document.
pub(crate) fn close_after_last_line<N: Block>(
    node: &mut N,
    tokens: &[Token<'_>],
    cx: &mut Context,
) -> Result<Effect, ParseError> {
    let consumed = tokens.len() - 1;
    push_last_after(node, cx, &text(&tokens[..consumed]))?;
    close(node, cx)?;
    Ok(Effect::pop(consumed))
}

/// `[End]` right after an item.
pub(crate) fn close_at_end<N: Block>(
    node: &mut N,
    _: &[Token<'_>],
    cx: &mut Context,
) -> Result<Effect, ParseError> {
    close(node, cx)?;
    Ok(Effect::pop(0))
}
