//! The driver: feeds a growing lookahead window to the node on top of the stack.

use yason_tokenizer::{Span, Token};

use crate::document::DocumentNode;
use crate::engine::{Advance, Context, Machine, StackOp, try_advance};
use crate::error::{NodeKind, ParseError, ParseErrorKind};
use crate::tree::{Node, NodeId, Tree};

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest nesting level a map or list may have. The top-level block is at 0.
    pub max_nesting: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_nesting: 64 }
    }
}

/// Parse a token sequence ending in `End` with default options.
pub fn parse(tokens: &[Token<'_>]) -> Result<Tree, ParseError> {
    parse_with(tokens, &ParseOptions::default())
}

/// Parse a token sequence ending in `End`.
pub fn parse_with(tokens: &[Token<'_>], options: &ParseOptions) -> Result<Tree, ParseError> {
    Parser::new(tokens, options).run()
}

/// An entry on the node stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Document,
    Nested(NodeId),
}

struct Parser<'a, 'src> {
    tokens: &'a [Token<'src>],
    options: &'a ParseOptions,
    document: DocumentNode,
    nodes: Vec<Node>,
    stack: Vec<Frame>,
    cx: Context,
}

impl<'a, 'src> Parser<'a, 'src> {
    fn new(tokens: &'a [Token<'src>], options: &'a ParseOptions) -> Self {
        Self {
            tokens,
            options,
            document: DocumentNode::new(),
            nodes: Vec::new(),
            stack: vec![Frame::Document],
            cx: Context::default(),
        }
    }

    fn run(mut self) -> Result<Tree, ParseError> {
        let tokens = self.tokens;
        let mut start = 0;
        let mut end = 0;

        while start < tokens.len() || !self.stack.is_empty() {
            let Some(&frame) = self.stack.last() else {
                let span = self.span_at(start);
                return Err(ParseError::new(ParseErrorKind::EmptyStack, span));
            };
            let (node, state, matchable) = self.describe(frame);
            let window = &tokens[start..(end + 1).min(tokens.len())];
            self.cx.at = self.span_at(start);

            match self.advance(frame, window)? {
                Advance::Fired { effect, .. } => {
                    self.apply(frame, effect.stack)?;
                    start += effect.consumed;
                    if start > end {
                        end += 1;
                    }
                }
                Advance::Undecided => {
                    if window.len() >= matchable {
                        let span = match (window.first(), window.last()) {
                            (Some(first), Some(last)) => first.span.cover(last.span),
                            _ => self.cx.at,
                        };
                        return Err(ParseError::new(
                            ParseErrorKind::Syntax {
                                node,
                                state,
                                found: describe_window(window),
                            },
                            span,
                        ));
                    }
                    end += 1;
                }
            }

            if end > tokens.len() {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedEndOfDocument { node, state },
                    self.span_at(tokens.len()),
                ));
            }
        }

        self.finish()
    }

    fn describe(&self, frame: Frame) -> (NodeKind, &'static str, usize) {
        match frame {
            Frame::Document => (
                NodeKind::Document,
                self.document.state_name(),
                self.document.matchable_tokens(),
            ),
            Frame::Nested(id) => {
                let node = &self.nodes[id.0];
                (node.kind(), node.state_name(), node.matchable_tokens())
            }
        }
    }

    fn advance(&mut self, frame: Frame, window: &[Token<'_>]) -> Result<Advance, ParseError> {
        match frame {
            Frame::Document => try_advance(&mut self.document, window, &mut self.cx),
            Frame::Nested(id) => self.nodes[id.0].try_advance(window, &mut self.cx),
        }
    }

    fn apply(&mut self, frame: Frame, op: StackOp) -> Result<(), ParseError> {
        match op {
            StackOp::Stay => {}
            StackOp::Pop => {
                self.stack.pop();
                debug!("popped {:?}, {} frames left", frame, self.stack.len());
            }
            StackOp::Push(child) => {
                if child.nesting() > self.options.max_nesting {
                    return Err(self.cx.error(ParseErrorKind::NestingTooDeep {
                        limit: self.options.max_nesting,
                    }));
                }
                let id = NodeId(self.nodes.len());
                debug!(
                    "pushed {} {:?} at nesting {}",
                    child.kind(),
                    id,
                    child.nesting()
                );
                self.nodes.push(child);
                match frame {
                    Frame::Document => self.document.attach(id),
                    Frame::Nested(parent) => self.nodes[parent.0].attach(id, &self.cx)?,
                }
                self.stack.push(Frame::Nested(id));
            }
        }
        Ok(())
    }

    /// Span of the token at `index`, or an empty span at the end of the input.
    fn span_at(&self, index: usize) -> Span {
        match self.tokens.get(index) {
            Some(token) => token.span,
            None => self
                .tokens
                .last()
                .map(|token| Span::empty(token.span.end))
                .unwrap_or_default(),
        }
    }

    fn finish(self) -> Result<Tree, ParseError> {
        let end = self.span_at(self.tokens.len());
        let Some(value) = self.document.value else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedEndOfDocument {
                    node: NodeKind::Document,
                    state: "beforeValue",
                },
                end,
            ));
        };
        Ok(Tree {
            whitespace: self.document.whitespace,
            value,
            nodes: self.nodes,
            indent: self.cx.indent,
        })
    }
}

fn describe_window(window: &[Token<'_>]) -> String {
    window
        .iter()
        .map(|token| format!("{:?} {:?}", token.kind, token.text))
        .collect::<Vec<_>>()
        .join(", ")
}
