//! Input scanning helpers for the tokenizer.
//!
//! Every scanner works on bytes and only ever splits the input at ASCII bytes,
//! so returned lengths always fall on `char` boundaries.

/// Word characters of tag names: ASCII letters, digits and `_`.
pub(super) const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Whitespace separating attributes.
pub(super) const fn is_space_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0B' | b'\x0C')
}

/// Characters allowed in attribute names.
pub(super) const fn is_attribute_name_byte(b: u8) -> bool {
    is_word_byte(b) || matches!(b, b'-' | b':' | b'"' | b'.' | b'/')
}

/// Length of the prefix of `bytes` whose bytes satisfy `pred`.
pub(super) fn count_while(bytes: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    bytes.iter().take_while(|&&b| pred(b)).count()
}

/// Length of an attribute name at the start of `bytes`.
///
/// A `/` immediately followed by `>` is a self-closing marker, not part of the
/// name.
fn attribute_name_len(bytes: &[u8]) -> usize {
    let mut len = 0;
    while let Some(&b) = bytes.get(len) {
        if !is_attribute_name_byte(b) || (b == b'/' && bytes.get(len + 1) == Some(&b'>')) {
            break;
        }
        len += 1;
    }
    len
}

/// Length of an attribute value at the start of `bytes`: a double-quoted or
/// single-quoted string including its quotes, or a bare run of bytes that are
/// neither whitespace nor `>`.
fn attribute_value_len(bytes: &[u8]) -> Option<usize> {
    match bytes.first()? {
        &quote @ (b'"' | b'\'') => bytes[1..]
            .iter()
            .position(|&b| b == quote)
            .map(|close| close + 2),
        _ => {
            let len = count_while(bytes, |b| b != b'>' && !is_space_byte(b));
            (len > 0).then_some(len)
        }
    }
}

/// A well-shaped start tag at the start of the input.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct StartTagMatch<'a> {
    /// Bytes covered by the tag, `<` through `>`.
    pub len: usize,
    /// Tag name as written.
    pub name: &'a str,
    /// Everything between the name and the closing `>` or `/>`, untrimmed at
    /// the front.
    pub attributes: &'a str,
    /// Written with a trailing `/>`.
    pub self_closing: bool,
}

/// Match `<`, an optional `!` or `?`, a tag name, whitespace-separated
/// `name[=value]` attributes, optional whitespace, an optional `/`, and `>`.
pub(super) fn scan_start_tag(input: &str) -> Option<StartTagMatch<'_>> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'<') {
        return None;
    }
    let mut pos = 1;
    if matches!(bytes.get(pos), Some(b'!' | b'?')) {
        pos += 1;
    }

    let name_start = pos;
    pos += count_while(&bytes[pos..], is_word_byte);
    if pos == name_start {
        return None;
    }
    let name = &input[name_start..pos];
    let attributes_start = pos;

    loop {
        let spaces = count_while(&bytes[pos..], is_space_byte);
        let next = pos + spaces;
        match bytes.get(next) {
            None => return None,
            Some(b'>') => {
                return Some(StartTagMatch {
                    len: next + 1,
                    name,
                    attributes: &input[attributes_start..pos],
                    self_closing: false,
                });
            }
            Some(b'/') if bytes.get(next + 1) == Some(&b'>') => {
                return Some(StartTagMatch {
                    len: next + 2,
                    name,
                    attributes: &input[attributes_start..pos],
                    self_closing: true,
                });
            }
            Some(_) if spaces == 0 => return None,
            Some(_) => {}
        }

        pos = next;
        let name_len = attribute_name_len(&bytes[pos..]);
        if name_len == 0 {
            return None;
        }
        pos += name_len;

        let equals = pos + count_while(&bytes[pos..], is_space_byte);
        if bytes.get(equals) == Some(&b'=') {
            let value_start = equals + 1 + count_while(&bytes[equals + 1..], is_space_byte);
            pos = value_start + attribute_value_len(&bytes[value_start..])?;
        }
    }
}

/// Memoized forward search for one needle.
///
/// The tokenizer cursor only moves forward, so a match at or after the cursor
/// stays the first match, and a miss stays a miss. Each byte is scanned a
/// bounded number of times over a whole run.
#[derive(Debug)]
pub(super) struct ForwardSearch {
    needle: &'static str,
    /// Offset the cached search started from, once one has run.
    from: Option<usize>,
    found: Option<usize>,
}

impl ForwardSearch {
    pub(super) const fn new(needle: &'static str) -> Self {
        Self {
            needle,
            from: None,
            found: None,
        }
    }

    /// Absolute offset of the first `needle` at or after `from`.
    ///
    /// `from` must not decrease between calls and must fall on a `char`
    /// boundary.
    pub(super) fn find(&mut self, haystack: &str, from: usize) -> Option<usize> {
        let cached = self
            .from
            .is_some_and(|start| start <= from && self.found.is_none_or(|at| at >= from));
        if !cached {
            self.from = Some(from);
            self.found = haystack
                .get(from..)
                .and_then(|rest| rest.find(self.needle))
                .map(|at| from + at);
        }
        self.found
    }
}

/// Match `</`, a tag name, and anything up to the next `>`.
///
/// `close` is the offset of the first `>` in `input`. Returns the bytes
/// covered and the tag name as written.
pub(super) fn scan_end_tag(input: &str, close: Option<usize>) -> Option<(usize, &str)> {
    let rest = input.strip_prefix("</")?;
    let name_len = count_while(rest.as_bytes(), is_word_byte);
    if name_len == 0 {
        return None;
    }
    // `</` and the name hold no `>`, so the first one follows the name.
    Some((close? + 1, &rest[..name_len]))
}

/// A `<` only opens a tag if a `>` follows before any further `<`.
///
/// `close` is the offset of the first `>` in `input`.
pub(super) fn closes_before_next_open(input: &str, close: Option<usize>) -> bool {
    close.is_some_and(|close| input.get(1..close).is_some_and(|inner| !inner.contains('<')))
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
///
/// `needle` must be ASCII.
pub(super) fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

/// Locate the end tag closing a verbatim element: `</tag`, then anything up to
/// the next `>`. Returns `(start, end)` byte offsets of the closer.
pub(super) fn find_closing_tag(input: &str, tag: &str) -> Option<(usize, usize)> {
    let opener = format!("</{tag}");
    let start = find_ignore_ascii_case(input, &opener)?;
    let after = start + opener.len();
    let close = input[after..].find('>')?;
    Some((start, after + close + 1))
}

/// Replace every `open ... close` span with its interior.
///
/// An `open` without a matching `close` is left as is.
pub(super) fn unwrap_markers(text: &str, open: &str, close: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        let interior = &rest[start + open.len()..];
        let Some(end) = interior.find(close) else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&interior[..end]);
        rest = &interior[end + close.len()..];
    }
    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_tag_shapes() {
        let m = scan_start_tag(r#"<a href="x" title='y z' data=w>rest"#).unwrap();
        assert_eq!(m.name, "a");
        assert_eq!(m.attributes, r#" href="x" title='y z' data=w"#);
        assert_eq!(m.len, 31);
        assert!(!m.self_closing);

        let m = scan_start_tag("<br/>").unwrap();
        assert_eq!((m.name, m.attributes, m.len, m.self_closing), ("br", "", 5, true));

        let m = scan_start_tag("<img src=a.png />").unwrap();
        assert_eq!(m.attributes, " src=a.png");
        assert!(m.self_closing);

        let m = scan_start_tag("<!DOCTYPE html>").unwrap();
        assert_eq!((m.name, m.attributes), ("DOCTYPE", " html"));
    }

    #[test]
    fn malformed_start_tags_do_not_match() {
        assert_eq!(scan_start_tag("< p>"), None);
        assert_eq!(scan_start_tag("<a href=>"), None);
        assert_eq!(scan_start_tag(r#"<a href="x>"#), None);
        assert_eq!(scan_start_tag("<a=b>"), None);
        assert_eq!(scan_start_tag("<a"), None);
        assert_eq!(scan_start_tag("<?xml version=\"1.0\"?>"), None);
    }

    fn first_close(input: &str) -> Option<usize> {
        input.find('>')
    }

    #[test]
    fn end_tags() {
        for (input, expected) in [
            ("</p>x", Some((4, "p"))),
            ("</B junk>", Some((9, "B"))),
            ("</>", None),
            ("</p", None),
        ] {
            assert_eq!(scan_end_tag(input, first_close(input)), expected, "{input}");
        }
    }

    #[test]
    fn less_than_lookahead() {
        for (input, expected) in [
            ("<b>", true),
            ("<b", false),
            ("<a <b>", false),
            ("<a>b<c>", true),
        ] {
            assert_eq!(
                closes_before_next_open(input, first_close(input)),
                expected,
                "{input}"
            );
        }
    }

    #[test]
    fn forward_search_reuses_hits_and_misses() {
        let haystack = "a>b>c";
        let mut search = ForwardSearch::new(">");
        assert_eq!(search.find(haystack, 0), Some(1));
        assert_eq!(search.find(haystack, 1), Some(1));
        assert_eq!(search.find(haystack, 2), Some(3));
        assert_eq!(search.find(haystack, 4), None);
        assert_eq!(search.find(haystack, 5), None);

        let mut comment = ForwardSearch::new("-->");
        assert_eq!(comment.find("<!-- x --> y", 4), Some(7));
    }

    #[test]
    fn case_insensitive_search() {
        assert_eq!(find_ignore_ascii_case("abc</SCRIPT>", "</script>"), Some(3));
        assert_eq!(find_closing_tag("x</Pre >y", "pre"), Some((1, 8)));
        assert_eq!(find_closing_tag("x</pre", "pre"), None);
    }

    #[test]
    fn markers_are_unwrapped() {
        assert_eq!(unwrap_markers("a<!--b-->c<!--d", "<!--", "-->"), "abc<!--d");
        assert_eq!(unwrap_markers("<![CDATA[x<y]]>", "<![CDATA[", "]]>"), "x<y");
    }
}
