//! Character reference decoding.
//!
//! Attribute values reach the sanitizer exactly as written, so a scheme can be
//! hidden behind references (`jav&#x61;script:`, `javascript&colon;`). The
//! sanitizer decodes a copy of each URL value with [`decode_character_references`]
//! and checks the scheme of the decoded form as well. Only a subset of the named
//! references is known; unknown names are left as written.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Named references, keyed without the leading `&`.
///
/// Legacy names that browsers accept without a trailing `;` appear twice.
static NAMED_REFERENCES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("amp;", "&"),
        ("amp", "&"),
        ("lt;", "<"),
        ("lt", "<"),
        ("gt;", ">"),
        ("gt", ">"),
        ("quot;", "\""),
        ("quot", "\""),
        ("apos;", "'"),
        ("nbsp;", "\u{00A0}"),
        ("nbsp", "\u{00A0}"),
        // Punctuation that can assemble a scheme or split one
        ("colon;", ":"),
        ("sol;", "/"),
        ("bsol;", "\\"),
        ("period;", "."),
        ("comma;", ","),
        ("semi;", ";"),
        ("lpar;", "("),
        ("rpar;", ")"),
        ("plus;", "+"),
        ("hyphen;", "-"),
        ("dash;", "\u{2010}"),
        ("num;", "#"),
        ("percnt;", "%"),
        ("equals;", "="),
        ("excl;", "!"),
        ("quest;", "?"),
        ("commat;", "@"),
        ("grave;", "`"),
        // Whitespace
        ("tab;", "\t"),
        ("newline;", "\n"),
        ("nobreak;", "\u{2060}"),
        ("zwj;", "\u{200D}"),
        ("zwnj;", "\u{200C}"),
        ("shy;", "\u{00AD}"),
        ("shy", "\u{00AD}"),
        // Common symbols
        ("copy;", "\u{00A9}"),
        ("copy", "\u{00A9}"),
        ("reg;", "\u{00AE}"),
        ("reg", "\u{00AE}"),
        ("trade;", "\u{2122}"),
        ("mdash;", "\u{2014}"),
        ("ndash;", "\u{2013}"),
        ("hellip;", "\u{2026}"),
        ("laquo;", "\u{00AB}"),
        ("raquo;", "\u{00BB}"),
    ])
});

/// Longest name in [`NAMED_REFERENCES`], without the `;`.
const LONGEST_NAME: usize = 7;

/// Decode numeric and known named character references in `input`.
///
/// Numeric references may omit the trailing `;`. A numeric reference to NUL, a
/// surrogate, or a value above U+10FFFF decodes to U+FFFD. Text without a `&` is
/// returned borrowed.
///
/// ```
/// use scour_html::entities::decode_character_references;
///
/// assert_eq!(decode_character_references("a&#x62;c&colon;"), "abc:");
/// assert_eq!(decode_character_references("plain"), "plain");
/// ```
#[must_use]
pub fn decode_character_references(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut decoded = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let reference = &rest[amp + 1..];
        let consumed = if let Some(numeric) = reference.strip_prefix('#') {
            decode_numeric(numeric, &mut decoded).map(|len| len + 1)
        } else {
            decode_named(reference, &mut decoded)
        };
        match consumed {
            Some(len) => rest = &reference[len..],
            None => {
                decoded.push('&');
                rest = reference;
            }
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}

/// Decode the part of a numeric reference after `&#`, returning the bytes used.
fn decode_numeric(text: &str, out: &mut String) -> Option<usize> {
    let (radix, prefix) = match text.as_bytes().first() {
        Some(b'x' | b'X') => (16, 1),
        _ => (10, 0),
    };
    let digits = text[prefix..]
        .bytes()
        .take_while(|b| char::from(*b).is_digit(radix))
        .count();
    if digits == 0 {
        return None;
    }

    let value = u32::from_str_radix(&text[prefix..prefix + digits], radix).ok();
    let c = value
        .filter(|&value| value != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    out.push(c);

    let semicolon = usize::from(text[prefix + digits..].starts_with(';'));
    Some(prefix + digits + semicolon)
}

/// Decode the longest known named reference at the start of `text`, returning
/// the bytes used.
fn decode_named(text: &str, out: &mut String) -> Option<usize> {
    let name_len = text
        .bytes()
        .take_while(u8::is_ascii_alphanumeric)
        .count()
        .min(LONGEST_NAME);
    let with_semicolon = usize::from(text[name_len..].starts_with(';'));

    (1..=name_len + with_semicolon).rev().find_map(|len| {
        let replacement = NAMED_REFERENCES.get(&text[..len])?;
        out.push_str(replacement);
        Some(len)
    })
}
