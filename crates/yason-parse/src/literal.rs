//! Decoding string and number literals.

use serde_json::Number;

/// Decode a double-quoted string literal, quotes included.
pub(crate) fn unescape(raw: &str) -> Result<String, &'static str> {
    let inner = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or("string is not quoted")?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => out.push(unicode_escape(&mut chars)?),
            _ => return Err("invalid escape sequence"),
        }
    }
    Ok(out)
}

/// The character after a `\u`, combining a UTF-16 surrogate pair when needed.
fn unicode_escape(chars: &mut std::str::Chars<'_>) -> Result<char, &'static str> {
    let high = hex4(chars)?;
    let code = if (0xD800..0xDC00).contains(&high) {
        if chars.next() != Some('\\') || chars.next() != Some('u') {
            return Err("unpaired surrogate in \\u escape");
        }
        let low = hex4(chars)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err("unpaired surrogate in \\u escape");
        }
        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
    } else {
        high
    };
    char::from_u32(code).ok_or("unpaired surrogate in \\u escape")
}

fn hex4(chars: &mut std::str::Chars<'_>) -> Result<u32, &'static str> {
    let mut code = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or("\\u escape needs four hex digits")?;
        code = code * 16 + digit;
    }
    Ok(code)
}

/// Decode a number literal into the narrowest JSON number that holds it.
pub(crate) fn number(raw: &str) -> Result<Number, &'static str> {
    if !raw.contains(['.', 'e', 'E']) {
        if let Ok(n) = raw.parse::<i64>() {
            return Ok(n.into());
        }
        if let Ok(n) = raw.parse::<u64>() {
            return Ok(n.into());
        }
    }
    let float: f64 = raw.parse().map_err(|_| "malformed number")?;
    Number::from_f64(float).ok_or("number is out of range")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_string() {
        assert_eq!(unescape(r#""Hello World""#).unwrap(), "Hello World");
        assert_eq!(unescape(r#""""#).unwrap(), "");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            unescape(r#""a\"b\\c\/d\b\f\n\r\t""#).unwrap(),
            "a\"b\\c/d\u{8}\u{c}\n\r\t"
        );
        assert_eq!(unescape(r#""\u00e9\u00E9""#).unwrap(), "éé");
    }

    #[test]
    fn test_surrogate_pair() {
        assert_eq!(unescape(r#""\ud83d\ude00""#).unwrap(), "😀");
    }

    #[test]
    fn test_lone_surrogates() {
        assert!(unescape(r#""\ud83d""#).is_err());
        assert!(unescape(r#""\ud83dx""#).is_err());
        assert!(unescape(r#""\ude00""#).is_err());
        assert!(unescape(r#""\ud83d\u0041""#).is_err());
    }

    #[test]
    fn test_integers() {
        assert_eq!(number("123").unwrap(), Number::from(123));
        assert_eq!(number("-7").unwrap(), Number::from(-7));
        assert_eq!(number("01134").unwrap(), Number::from(1134));
        assert_eq!(
            number("18446744073709551615").unwrap(),
            Number::from(u64::MAX)
        );
    }

    #[test]
    fn test_floats() {
        assert_eq!(number("-3.142").unwrap().as_f64(), Some(-3.142));
        assert_eq!(number("1E5").unwrap().as_f64(), Some(100000.0));
        assert_eq!(number(".5").unwrap().as_f64(), Some(0.5));
        assert_eq!(number("5.").unwrap().as_f64(), Some(5.0));
        assert!(number("1E5").unwrap().is_f64());
    }

    #[test]
    fn test_out_of_range() {
        assert!(number("1e999").is_err());
    }
}
