//! Value token grammar for inline style declarations.
//!
//! A declaration value is split on whitespace and every piece is classified on
//! its own, so `rgb(1, 2, 3)` arrives here as `rgb(1,`, `2,` and `3)`.

use std::collections::BTreeSet;

/// Units a numeric token may carry.
pub const LENGTH_UNITS: [&str; 9] = ["cm", "em", "ex", "in", "mm", "pc", "pt", "px", "%"];

/// Why a value token was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `#` followed by hex digits.
    HexColor,
    /// The head (or whole) of an `rgb(...)` call.
    RgbFunction,
    /// Optionally signed decimal with an optional unit, or a bare `,` / `)`.
    Numeric,
    /// A whitelisted keyword.
    Keyword,
}

/// Classify a single value token, or `None` if it must be dropped.
#[must_use]
pub fn classify_value(token: &str, keywords: &BTreeSet<String>) -> Option<ValueKind> {
    if is_hex_color(token) {
        Some(ValueKind::HexColor)
    } else if is_rgb_function(token) {
        Some(ValueKind::RgbFunction)
    } else if is_numeric(token) {
        Some(ValueKind::Numeric)
    } else if keywords.contains(token) {
        Some(ValueKind::Keyword)
    } else {
        None
    }
}

fn is_hex_color(token: &str) -> bool {
    token
        .strip_prefix('#')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// `rgb(` digits `%`? `,` digits? `%`? `,`? digits? `%`? `)`?
fn is_rgb_function(token: &str) -> bool {
    let Some(rest) = token.strip_prefix("rgb(") else {
        return false;
    };
    let mut cursor = Cursor::new(rest);

    if cursor.digits() == 0 {
        return false;
    }
    let _ = cursor.eat(b'%');
    if !cursor.eat(b',') {
        return false;
    }
    let _ = cursor.digits();
    let _ = cursor.eat(b'%');
    let _ = cursor.eat(b',');
    let _ = cursor.digits();
    let _ = cursor.eat(b'%');
    let _ = cursor.eat(b')');
    cursor.at_end()
}

/// `-`? digits? `.`? digits? (unit | `,` | `)`)?
fn is_numeric(token: &str) -> bool {
    let mut cursor = Cursor::new(token);
    let _ = cursor.eat(b'-');
    let _ = cursor.digits();
    let _ = cursor.eat(b'.');
    let _ = cursor.digits();

    let suffix = cursor.rest();
    suffix.is_empty() || suffix == "," || suffix == ")" || LENGTH_UNITS.contains(&suffix)
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.input.as_bytes().get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn digits(&mut self) -> usize {
        let count = self.input.as_bytes()[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        self.pos += count;
        count
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    const fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }
}
