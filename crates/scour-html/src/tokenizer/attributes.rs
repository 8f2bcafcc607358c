//! Attribute text parsing.
//!
//! Runs over the text between a start tag's name and its closing `>`, which the
//! tokenizer has already checked for shape, and picks out every `name[=value]`
//! pair.

use super::helpers::{count_while, is_attribute_name_byte, is_space_byte};
use super::token::Attribute;
use crate::classification::ClassificationConfig;

/// Parse the attribute text of a start tag.
///
/// Each value is taken from a double-quoted string (backslash escapes
/// honored), a single-quoted string, or a bare run up to whitespace or `>`, in
/// that order of preference. A missing or empty value defaults to the
/// attribute's own name for boolean attributes (`disabled` becomes
/// `disabled="disabled"`) and to the empty string otherwise. Names and values
/// are lowercased.
#[must_use]
pub fn parse_attributes(text: &str, config: &ClassificationConfig) -> Vec<Attribute> {
    let bytes = text.as_bytes();
    let mut attributes = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let name_len = count_while(&bytes[pos..], is_attribute_name_byte);
        if name_len == 0 {
            pos += 1;
            continue;
        }
        let name = text[pos..pos + name_len].to_ascii_lowercase();
        pos += name_len;

        let mut value = None;
        let equals = pos + count_while(&bytes[pos..], is_space_byte);
        if bytes.get(equals) == Some(&b'=') {
            let value_start = equals + 1 + count_while(&bytes[equals + 1..], is_space_byte);
            if let Some((raw, consumed)) = read_value(&text[value_start..]) {
                value = Some(raw.to_lowercase());
                pos = value_start + consumed;
            }
        }

        let value = match value.filter(|v| !v.is_empty()) {
            Some(v) => v,
            None if config.is_boolean_attribute(&name) => name.clone(),
            None => String::new(),
        };
        attributes.push(Attribute::new(name, value));
    }

    attributes
}

/// Read one value; returns it without quotes along with the bytes consumed.
fn read_value(text: &str) -> Option<(&str, usize)> {
    let quoted = match text.as_bytes().first() {
        Some(b'"') => read_quoted(text, '"'),
        Some(b'\'') => read_quoted(text, '\''),
        _ => None,
    };
    quoted.or_else(|| {
        let len = count_while(text.as_bytes(), |b| b != b'>' && !is_space_byte(b));
        (len > 0).then(|| (&text[..len], len))
    })
}

/// Read a quoted string starting at `text[0]`, where a backslash escapes the
/// character after it. `None` if the quote is never closed.
fn read_quoted(text: &str, quote: char) -> Option<(&str, usize)> {
    let mut chars = text.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            let _ = chars.next();
        } else if c == quote {
            return Some((&text[1..i], i + 1));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<(String, String)> {
        parse_attributes(text, ClassificationConfig::default_tables())
            .into_iter()
            .map(|a| (a.name, a.value))
            .collect()
    }

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn quoting_styles() {
        assert_eq!(
            parse(r#" A="One Two" b='x"y' c=Bare"#),
            vec![pair("a", "one two"), pair("b", r#"x"y"#), pair("c", "bare")]
        );
    }

    #[test]
    fn backslash_escapes_inside_double_quotes() {
        assert_eq!(parse(r#" t="a\"b""#), vec![pair("t", r#"a\"b"#)]);
    }

    #[test]
    fn boolean_attributes_default_to_their_name() {
        assert_eq!(
            parse(" disabled checked=\"\" title"),
            vec![
                pair("disabled", "disabled"),
                pair("checked", "checked"),
                pair("title", "")
            ]
        );
    }

    #[test]
    fn spaces_around_equals() {
        assert_eq!(parse(" href = 'x' "), vec![pair("href", "x")]);
    }

    #[test]
    fn unterminated_quote_falls_back_to_bare_value() {
        assert_eq!(parse(r#" a="xy"#), vec![pair("a", "\"xy")]);
    }
}
