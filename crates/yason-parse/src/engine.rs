//! The rule engine shared by every grammar node.
//!
//! A node is a state machine. Each state owns an ordered list of [`Rule`]s, and each
//! rule pairs a token pattern with an action. Given a lookahead window,
//! [`try_advance`] fires a rule only when the choice is unambiguous: exactly one
//! pattern matches and no other pattern could still match a longer window. When no
//! pattern could match at all, a rule with an empty pattern acts as the fallback.

use yason_tokenizer::{Matcher, Span, Token};

use crate::error::{NodeKind, ParseError, ParseErrorKind};
use crate::pattern::{could_match, match_length};
use crate::tree::Node;

/// A rule action: updates the node and reports what the driver should do next.
///
/// The token slice is exactly the part of the window the pattern matched.
pub type Action<N> = fn(&mut N, &[Token<'_>], &mut Context) -> Result<Effect, ParseError>;

/// A token pattern and the action that runs when it is selected.
pub struct Rule<N> {
    pub pattern: &'static [Matcher],
    pub action: Action<N>,
}

impl<N> Rule<N> {
    pub const fn new(pattern: &'static [Matcher], action: Action<N>) -> Self {
        Self { pattern, action }
    }

    /// A rule that fires when nothing else in its state could match.
    pub const fn fallback(action: Action<N>) -> Self {
        Self {
            pattern: &[],
            action,
        }
    }
}

/// Parse-wide state shared by all nodes.
#[derive(Debug, Default)]
pub struct Context {
    /// The indent unit, fixed by the first indented line.
    pub indent: Option<String>,
    /// Span of the token at the start of the current window.
    pub at: Span,
}

impl Context {
    /// An error located at the start of the current window.
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.at)
    }
}

/// Change to the node stack requested by an action.
#[derive(Debug)]
pub enum StackOp {
    Stay,
    Push(Node),
    Pop,
}

/// The outcome of a fired rule.
#[derive(Debug)]
pub struct Effect {
    /// Tokens to drop from the front of the window. May be less than the matched
    /// length, which leaves tokens for the next rule.
    pub consumed: usize,
    pub stack: StackOp,
}

impl Effect {
    /// Consume nothing and keep the stack; only the node's state changes.
    pub fn epsilon() -> Self {
        Self::consume(0)
    }

    pub fn consume(consumed: usize) -> Self {
        Self {
            consumed,
            stack: StackOp::Stay,
        }
    }

    pub fn push(child: impl Into<Node>, consumed: usize) -> Self {
        Self {
            consumed,
            stack: StackOp::Push(child.into()),
        }
    }

    pub fn pop(consumed: usize) -> Self {
        Self {
            consumed,
            stack: StackOp::Pop,
        }
    }
}

/// Result of offering a window to a node.
#[derive(Debug)]
pub enum Advance {
    /// A rule matched `matched` tokens and ran.
    Fired { matched: usize, effect: Effect },
    /// More lookahead is needed, or nothing matches.
    Undecided,
}

/// A grammar node driven by rules.
pub trait Machine: Sized + 'static {
    const KIND: NodeKind;

    /// Rules of the current state, in priority order.
    fn rules(&self) -> &'static [Rule<Self>];

    /// Name of the current state, for diagnostics.
    fn state_name(&self) -> &'static str;

    /// Longest pattern of the current state. A window this long that still cannot
    /// be decided is a syntax error.
    fn matchable_tokens(&self) -> usize {
        self.rules()
            .iter()
            .map(|rule| rule.pattern.len())
            .max()
            .unwrap_or(0)
    }
}

/// Offer `window` to `node` and fire the selected rule, if any.
pub fn try_advance<N: Machine>(
    node: &mut N,
    window: &[Token<'_>],
    cx: &mut Context,
) -> Result<Advance, ParseError> {
    let rules = node.rules();
    let mut candidates = 0;
    let mut matches = 0;
    let mut selected = None;
    let mut fallback = None;

    for rule in rules {
        if rule.pattern.is_empty() {
            fallback.get_or_insert(rule);
            continue;
        }
        if !could_match(window, rule.pattern) {
            continue;
        }
        candidates += 1;
        if let Some(length) = match_length(window, rule.pattern) {
            matches += 1;
            selected.get_or_insert((rule, length));
        }
    }

    let (rule, matched) = match (selected, fallback) {
        (Some(selected), _) if matches == 1 && candidates == 1 => selected,
        (None, Some(fallback)) if candidates == 0 => (fallback, 0),
        _ => {
            trace!(
                "{} {}: undecided with {} tokens ({} candidates, {} matches)",
                N::KIND,
                node.state_name(),
                window.len(),
                candidates,
                matches
            );
            return Ok(Advance::Undecided);
        }
    };

    trace!(
        "{} {}: rule {:?} matched {} tokens",
        N::KIND,
        node.state_name(),
        rule.pattern,
        matched
    );
    let state = node.state_name();
    let effect = (rule.action)(node, &window[..matched], cx)?;
    if effect.consumed > matched {
        return Err(cx.error(ParseErrorKind::ConsumedExceedsMatched {
            node: N::KIND,
            state,
            consumed: effect.consumed,
            matched,
        }));
    }
    Ok(Advance::Fired { matched, effect })
}
