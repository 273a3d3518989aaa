//! Tokenizer for the yason configuration language.

use std::fmt;

use crate::{Span, Token, TokenKind};
use tracing::trace;

/// Returns the byte length of the token starting at the beginning of the input.
type Recognizer = fn(&str) -> Option<usize>;

/// Recognizers in priority order: the first one that matches wins.
const RECOGNIZERS: &[(TokenKind, Recognizer)] = &[
    (TokenKind::True, recognize_true),
    (TokenKind::False, recognize_false),
    (TokenKind::Null, recognize_null),
    (TokenKind::Number, recognize_number),
    (TokenKind::String, recognize_string),
    (TokenKind::Symbol, recognize_symbol),
    (TokenKind::Colon, recognize_colon),
    (TokenKind::Dash, recognize_dash),
    (TokenKind::Comma, recognize_comma),
    (TokenKind::LBrace, recognize_lbrace),
    (TokenKind::RBrace, recognize_rbrace),
    (TokenKind::LBracket, recognize_lbracket),
    (TokenKind::RBracket, recognize_rbracket),
    (TokenKind::LineEnd, recognize_line_end),
    (TokenKind::Padding, recognize_padding),
    (TokenKind::Newline, recognize_newline),
];

/// No recognizer matched at some offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    /// Where the unrecognized input starts.
    pub span: Span,
    /// Up to 20 characters of the unrecognized input.
    pub near: String,
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected token near {:?} at offset {}",
            self.near, self.span.start
        )
    }
}

impl std::error::Error for TokenizeError {}

/// Tokenize a whole document, including the trailing `End` token.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, TokenizeError> {
    Tokenizer::new(source).collect()
}

/// A tokenizer that produces tokens from yason source text.
#[derive(Clone)]
pub struct Tokenizer<'src> {
    /// The source text being tokenized.
    source: &'src str,
    /// The remaining source text (suffix of `source`).
    remaining: &'src str,
    /// Current byte position in `source`.
    pos: u32,
    /// Set once `End` or an error has been yielded by the iterator.
    finished: bool,
}

impl<'src> Tokenizer<'src> {
    /// Create a new tokenizer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            remaining: source,
            pos: 0,
            finished: false,
        }
    }

    /// Get the current byte position.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Get the next token. Returns `End` repeatedly once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token<'src>, TokenizeError> {
        if self.remaining.is_empty() {
            return Ok(self.token(TokenKind::End, 0));
        }

        for &(kind, recognize) in RECOGNIZERS {
            if let Some(len) = recognize(self.remaining) {
                return Ok(self.token(kind, len));
            }
        }

        let near: String = self.remaining.chars().take(20).collect();
        Err(TokenizeError {
            span: Span::new(self.pos, self.pos + near.len() as u32),
            near,
        })
    }

    /// Consume `len` bytes as a token of the given kind.
    fn token(&mut self, kind: TokenKind, len: usize) -> Token<'src> {
        let start = self.pos;
        self.pos += len as u32;
        self.remaining = &self.remaining[len..];
        let span = Span::new(start, self.pos);
        let text = span.slice(self.source);
        trace!("Token {:?} at {:?}: {:?}", kind, span, text);
        Token::new(kind, span, text)
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Result<Token<'src>, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        self.finished = match &result {
            Ok(token) => token.kind == TokenKind::End,
            Err(_) => true,
        };
        Some(result)
    }
}

/// Check if a character can appear in a bare symbol.
fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace()
        && !c.is_control()
        && !matches!(
            c,
            '\\' | '-' | '[' | ']' | '{' | '}' | ',' | '\'' | '"' | ':' | '#'
        )
}

/// Keywords and numbers must not run into a bare word.
fn at_boundary(rest: &str) -> bool {
    rest.chars().next().is_none_or(|c| !is_symbol_char(c))
}

fn at_line_break(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n")
}

fn count_blanks(s: &str) -> usize {
    s.len() - s.trim_start_matches([' ', '\t']).len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn keyword(s: &str, word: &str) -> Option<usize> {
    let rest = s.strip_prefix(word)?;
    at_boundary(rest).then_some(word.len())
}

fn recognize_true(s: &str) -> Option<usize> {
    keyword(s, "true")
}

fn recognize_false(s: &str) -> Option<usize> {
    keyword(s, "false")
}

fn recognize_null(s: &str) -> Option<usize> {
    keyword(s, "null")
}

/// `-? digits* (. digits+)? ([eE] [+-]? digits+)?` with at least one mantissa digit.
fn recognize_number(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let sign = usize::from(bytes.first() == Some(&b'-'));
    let integer = count_digits(&bytes[sign..]);
    let mut end = sign + integer;

    let fraction = if bytes.get(end) == Some(&b'.') {
        count_digits(&bytes[end + 1..])
    } else {
        0
    };
    if fraction > 0 {
        end += 1 + fraction;
    } else if integer == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let digits = count_digits(&bytes[exponent..]);
        if digits > 0 {
            end = exponent + digits;
        }
    }

    at_boundary(&s[end..]).then_some(end)
}

/// Double-quoted string with JSON escapes and no raw control characters.
fn recognize_string(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    if chars.next()?.1 != '"' {
        return None;
    }
    loop {
        let (i, c) = chars.next()?;
        match c {
            '"' => return Some(i + 1),
            '\\' => match chars.next()?.1 {
                '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => {}
                'u' => {
                    for _ in 0..4 {
                        if !chars.next()?.1.is_ascii_hexdigit() {
                            return None;
                        }
                    }
                }
                _ => return None,
            },
            c if c.is_control() => return None,
            _ => {}
        }
    }
}

/// A bare word only counts as a symbol when a colon follows it on the same line.
fn recognize_symbol(s: &str) -> Option<usize> {
    let len: usize = s
        .chars()
        .take_while(|&c| is_symbol_char(c))
        .map(char::len_utf8)
        .sum();
    if len == 0 {
        return None;
    }
    let rest = &s[len..];
    rest[count_blanks(rest)..].starts_with(':').then_some(len)
}

fn punctuation(s: &str, c: char) -> Option<usize> {
    s.starts_with(c).then_some(c.len_utf8())
}

fn recognize_colon(s: &str) -> Option<usize> {
    punctuation(s, ':')
}

fn recognize_dash(s: &str) -> Option<usize> {
    punctuation(s, '-')
}

fn recognize_comma(s: &str) -> Option<usize> {
    punctuation(s, ',')
}

fn recognize_lbrace(s: &str) -> Option<usize> {
    punctuation(s, '{')
}

fn recognize_rbrace(s: &str) -> Option<usize> {
    punctuation(s, '}')
}

fn recognize_lbracket(s: &str) -> Option<usize> {
    punctuation(s, '[')
}

fn recognize_rbracket(s: &str) -> Option<usize> {
    punctuation(s, ']')
}

/// Trailing blanks and an optional comment, up to (not including) the line break.
fn recognize_line_end(s: &str) -> Option<usize> {
    let mut end = count_blanks(s);
    let rest = &s[end..];
    if rest.starts_with('#') {
        end += match rest.find('\n') {
            Some(i) if rest[..i].ends_with('\r') => i - 1,
            Some(i) => i,
            None => rest.len(),
        };
    }
    (end > 0 && at_line_break(&s[end..])).then_some(end)
}

/// Blanks with more content following on the same line.
fn recognize_padding(s: &str) -> Option<usize> {
    let len = count_blanks(s);
    let rest = &s[len..];
    (len > 0 && !rest.starts_with('#') && !at_line_break(rest)).then_some(len)
}

fn recognize_newline(s: &str) -> Option<usize> {
    if s.starts_with('\n') {
        Some(1)
    } else if s.starts_with("\r\n") {
        Some(2)
    } else {
        None
    }
}
