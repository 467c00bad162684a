//! Phase 3: Scalar inference
//!
//! Type inference for bare tokens.

use crate::value::Value;

/// Interpret a trimmed bare token.
///
/// Empty tokens are null. Tokens starting with a sign or digit are tried as
/// hexadecimal, binary, octal and then decimal numbers. The keywords
/// `true`/`on`/`yes`, `false`/`off`/`no` and `null`/`none` match without
/// regard to case. Everything else is a string with its escapes decoded.
pub fn parse_scalar(token: &str) -> Value {
    let first = match token.bytes().next() {
        Some(c) => c,
        None => return Value::Null,
    };
    if first == b'-' || first == b'+' || first.is_ascii_digit() {
        if let Some(n) = parse_number(token) {
            return Value::Number(n);
        }
    } else if let Some(v) = parse_keyword(token) {
        return v;
    }
    Value::String(decode_escapes(token))
}

fn parse_keyword(token: &str) -> Option<Value> {
    let is = |word: &str| token.eq_ignore_ascii_case(word);
    if is("true") || is("on") || is("yes") {
        Some(Value::Bool(true))
    } else if is("false") || is("off") || is("no") {
        Some(Value::Bool(false))
    } else if is("null") || is("none") {
        Some(Value::Null)
    } else {
        None
    }
}

/// Parse a numeric literal. Returns `None` when the token is not a number
/// in any supported radix.
pub fn parse_number(token: &str) -> Option<f64> {
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let sign = |n: f64| if negative { -n } else { n };

    if let Some(hex) = strip_radix_prefix(digits, b'x') {
        if let Some(n) = accumulate(hex, 16) {
            return Some(sign(n));
        }
    }
    if let Some(bin) = strip_radix_prefix(digits, b'b') {
        if let Some(n) = accumulate(bin, 2) {
            return Some(sign(n));
        }
    }
    if let Some(n) = parse_octal(digits) {
        return Some(sign(n));
    }
    token.parse::<f64>().ok()
}

/// Strip `0x`/`0X` (or `0b`/`0B`) from the front of `digits`.
fn strip_radix_prefix(digits: &str, marker: u8) -> Option<&str> {
    let bytes = digits.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' && bytes[1].to_ascii_lowercase() == marker {
        Some(&digits[2..])
    } else {
        None
    }
}

/// Fold every digit of `digits` in `radix`. Fails on any invalid digit.
fn accumulate(digits: &str, radix: u32) -> Option<f64> {
    digits.chars().try_fold(0.0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// A leading `0` followed only by `0`-`8` reads as octal. The value comes
/// from the longest `0`-`7` prefix, so `08` is zero.
fn parse_octal(digits: &str) -> Option<f64> {
    let rest = digits.strip_prefix('0')?;
    if !rest.bytes().all(|c| (b'0'..=b'8').contains(&c)) {
        return None;
    }
    let valid: String = rest.chars().take_while(|c| c.to_digit(8).is_some()).collect();
    accumulate(&valid, 8)
}

/// Decode backslash escapes. Unknown escapes and a trailing lone backslash
/// are kept verbatim.
pub fn decode_escapes(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('a') => out.push('\x07'),
            Some('b') => out.push('\x08'),
            Some('f') => out.push('\x0C'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\x0B'),
            Some(q @ ('\'' | '"' | '\\')) => out.push(q),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
