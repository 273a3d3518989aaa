//! Matching token windows against grammar patterns.
//!
//! A pattern is an ordered list of [`Matcher`]s. Optional elements that do not match
//! are skipped without consuming a token. Matching never looks past the window: if the
//! window runs out before the pattern does, [`match_length`] gives up while
//! [`could_match`] reports that more lookahead might still help.

use yason_tokenizer::{Matcher, Token, TokenKind};

pub const NEWLINE: Matcher = Matcher::Kind(TokenKind::Newline);
pub const PADDING: Matcher = Matcher::Kind(TokenKind::Padding);
pub const OPT_PADDING: Matcher = Matcher::Optional(&PADDING);
pub const LINE_END: Matcher = Matcher::Kind(TokenKind::LineEnd);
pub const OPT_LINE_END: Matcher = Matcher::Optional(&LINE_END);
pub const COLON: Matcher = Matcher::Kind(TokenKind::Colon);
pub const DASH: Matcher = Matcher::Kind(TokenKind::Dash);
pub const END: Matcher = Matcher::Kind(TokenKind::End);
pub const KEY: Matcher = Matcher::OneOf(&[TokenKind::String, TokenKind::Symbol]);
pub const ITEM_START: Matcher =
    Matcher::OneOf(&[TokenKind::String, TokenKind::Symbol, TokenKind::Dash]);
pub const BREAK_OR_END: Matcher = Matcher::OneOf(&[TokenKind::Newline, TokenKind::End]);
pub const LINE_END_OR_BREAK: Matcher = Matcher::OneOf(&[TokenKind::LineEnd, TokenKind::Newline]);

/// `key:` or `key :`
pub const KEY_COLON: &[Matcher] = &[KEY, OPT_PADDING, COLON];

/// Number of leading window tokens that satisfy `pattern`, or `None` if the pattern
/// fails or needs more tokens than the window holds.
pub fn match_length(window: &[Token<'_>], pattern: &[Matcher]) -> Option<usize> {
    let mut length = 0;
    for matcher in pattern {
        let token = window.get(length)?;
        if matcher.matches(token) {
            length += 1;
        } else if !matcher.is_optional() {
            return None;
        }
    }
    Some(length)
}

/// Whether `pattern` still fits the window, counting a window that ran out as a
/// possible match.
pub fn could_match(window: &[Token<'_>], pattern: &[Matcher]) -> bool {
    let mut length = 0;
    for matcher in pattern {
        let Some(token) = window.get(length) else {
            return true;
        };
        if matcher.matches(token) {
            length += 1;
        } else if !matcher.is_optional() {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use yason_tokenizer::Span;

    fn window(kinds: &[TokenKind]) -> Vec<Token<'static>> {
        kinds
            .iter()
            .map(|&kind| Token::new(kind, Span::empty(0), ""))
            .collect()
    }

    #[test]
    fn test_exact_match() {
        let tokens = window(&[TokenKind::Symbol, TokenKind::Colon, TokenKind::Padding]);
        assert_eq!(match_length(&tokens, KEY_COLON), Some(2));
        assert!(could_match(&tokens, KEY_COLON));
    }

    #[test]
    fn test_optional_taken_when_present() {
        let tokens = window(&[TokenKind::String, TokenKind::Padding, TokenKind::Colon]);
        assert_eq!(match_length(&tokens, KEY_COLON), Some(3));
    }

    #[test]
    fn test_short_window() {
        let tokens = window(&[TokenKind::Symbol]);
        assert_eq!(match_length(&tokens, KEY_COLON), None);
        assert!(could_match(&tokens, KEY_COLON));
    }

    #[test]
    fn test_window_ending_on_optional_is_undecided() {
        let pattern = [NEWLINE, OPT_LINE_END];
        let tokens = window(&[TokenKind::Newline]);
        assert_eq!(match_length(&tokens, &pattern), None);
        assert!(could_match(&tokens, &pattern));

        let tokens = window(&[TokenKind::Newline, TokenKind::Dash]);
        assert_eq!(match_length(&tokens, &pattern), Some(1));
    }

    #[test]
    fn test_mismatch() {
        let tokens = window(&[TokenKind::Dash, TokenKind::Colon]);
        assert_eq!(match_length(&tokens, KEY_COLON), None);
        assert!(!could_match(&tokens, KEY_COLON));
    }

    #[test]
    fn test_empty_pattern() {
        let tokens = window(&[TokenKind::Dash]);
        assert_eq!(match_length(&tokens, &[]), Some(0));
        assert!(could_match(&tokens, &[]));
        assert!(could_match(&[], KEY_COLON));
    }
}
