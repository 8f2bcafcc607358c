use std::collections::VecDeque;

use scour_common::MalformedInputError;
use strum_macros::Display;

use super::attributes::parse_attributes;
use super::helpers::{
    ForwardSearch, closes_before_next_open, find_closing_tag, find_ignore_ascii_case,
    scan_end_tag, scan_start_tag, unwrap_markers,
};
use super::token::Token;
use crate::classification::ClassificationConfig;

/// Text emitted for a `<` that does not open a tag.
const LESS_THAN: &str = "&lt;";

/// What the tokenizer does on its next iteration, chosen from the element on
/// top of the open-tag stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Ordinary content: tags, comments and text.
    Data,
    /// Inside a verbatim element: everything up to its end tag is one text
    /// token, with comment and CDATA markers unwrapped.
    Verbatim,
    /// Inside a raw-content element: everything up to its literal closing tag
    /// is one raw-escape token and the element closes silently.
    RawEscape,
}

/// Lenient tokenizer over one markup string.
///
/// Produces tokens lazily as an iterator. The sequence is finite: every
/// iteration consumes input, and once the input is exhausted all still-open
/// elements are closed, innermost first. To restart, build a new tokenizer over
/// the same input.
///
/// ```
/// use scour_html::{ClassificationConfig, MarkupTokenizer, Token};
///
/// let tokens = MarkupTokenizer::new("<p>Hi", ClassificationConfig::default_tables())
///     .run()
///     .unwrap();
/// assert!(tokens[0].is_start_of("p"));
/// assert_eq!(tokens[1], Token::Text { data: "Hi".into() });
/// assert!(tokens[2].is_end_of("p"));
/// ```
pub struct MarkupTokenizer<'a> {
    input: &'a str,
    /// Byte offset of the unconsumed input.
    pos: usize,
    config: &'a ClassificationConfig,
    /// Open, non-void elements; innermost last.
    stack: Vec<String>,
    /// Tokens produced by the last step and not yet handed out.
    pending: VecDeque<Token>,
    finished: bool,
    /// Next `>`, shared by every tag scan.
    tag_close: ForwardSearch,
    /// Next `-->`, shared by every comment scan.
    comment_close: ForwardSearch,
}

impl<'a> MarkupTokenizer<'a> {
    /// Create a tokenizer for `input` using the given classification tables.
    #[must_use]
    pub const fn new(input: &'a str, config: &'a ClassificationConfig) -> Self {
        Self {
            input,
            pos: 0,
            config,
            stack: Vec::new(),
            pending: VecDeque::new(),
            finished: false,
            tag_close: ForwardSearch::new(">"),
            comment_close: ForwardSearch::new("-->"),
        }
    }

    /// Tokenize the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedInputError::Stalled`] if an iteration fails to
    /// consume input.
    pub fn run(self) -> Result<Vec<Token>, MalformedInputError> {
        self.collect()
    }

    /// The state the next iteration will run in.
    #[must_use]
    pub fn state(&self) -> TokenizerState {
        match self.stack.last() {
            Some(top) if self.config.is_raw_content(top) => TokenizerState::RawEscape,
            Some(top) if self.config.is_verbatim(top) => TokenizerState::Verbatim,
            _ => TokenizerState::Data,
        }
    }

    /// Names of the currently open elements, innermost last.
    #[must_use]
    pub fn open_elements(&self) -> &[String] {
        &self.stack
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn emit(&mut self, token: Token) {
        log::trace!(target: "scour::tokenizer", "{token}");
        self.pending.push_back(token);
    }

    fn emit_text(&mut self, data: &str) {
        self.emit(Token::Text {
            data: data.to_string(),
        });
    }

    /// Run one iteration of the tokenizer loop.
    fn step(&mut self) -> Result<(), MalformedInputError> {
        if self.pos >= self.input.len() {
            // Clean up any remaining open elements.
            self.close_element(None);
            self.finished = true;
            return Ok(());
        }

        let before = self.pos;
        match self.state() {
            TokenizerState::Data => self.step_data(),
            TokenizerState::Verbatim => self.step_verbatim(),
            TokenizerState::RawEscape => self.step_raw_escape(),
        }

        if self.pos == before {
            return Err(MalformedInputError::stalled(self.pos, self.rest()));
        }
        Ok(())
    }

    fn step_data(&mut self) {
        let rest = self.rest();

        if rest.starts_with("<!--") {
            let body_start = self.pos + 4;
            match self.comment_close.find(self.input, body_start) {
                Some(end) => {
                    self.pos = end + 3;
                    self.emit(Token::Comment {
                        data: self.input[body_start..end].to_string(),
                    });
                }
                None => self.emit_less_than(),
            }
        } else if rest.starts_with('<') {
            let close = self
                .tag_close
                .find(self.input, self.pos)
                .map(|at| at - self.pos);
            if rest.starts_with("</") {
                match scan_end_tag(rest, close) {
                    Some((len, name)) => {
                        self.pos += len;
                        self.close_element(Some(&name.to_ascii_lowercase()));
                    }
                    None => self.emit_less_than(),
                }
            } else {
                match closes_before_next_open(rest, close)
                    .then(|| scan_start_tag(rest))
                    .flatten()
                {
                    Some(tag) => {
                        self.pos += tag.len;
                        self.open_element(tag.name, tag.attributes, tag.self_closing);
                    }
                    None => self.emit_less_than(),
                }
            }
        } else {
            let len = rest.find('<').unwrap_or(rest.len());
            self.pos += len;
            self.emit_text(&rest[..len]);
        }
    }

    /// A `<` that opens nothing becomes the literal text `&lt;`.
    fn emit_less_than(&mut self) {
        self.pos += 1;
        self.emit_text(LESS_THAN);
    }

    fn step_verbatim(&mut self) {
        let Some(tag) = self.stack.last().cloned() else {
            return;
        };
        let rest = self.rest();
        let (body_end, closer_end) =
            find_closing_tag(rest, &tag).unwrap_or((rest.len(), rest.len()));

        let body = unwrap_markers(&rest[..body_end], "<!--", "-->");
        let body = unwrap_markers(&body, "<![CDATA[", "]]>");
        self.pos += closer_end;
        if !body.is_empty() {
            self.emit(Token::Text { data: body });
        }
        self.close_element(Some(&tag));
    }

    fn step_raw_escape(&mut self) {
        let Some(tag) = self.stack.pop() else {
            return;
        };
        let rest = self.rest();
        let closer = format!("</{tag}>");
        let (body_end, closer_end) = find_ignore_ascii_case(rest, &closer)
            .map_or((rest.len(), rest.len()), |start| (start, start + closer.len()));

        self.pos += closer_end;
        self.emit(Token::RawEscape {
            name: tag,
            data: rest[..body_end].to_string(),
        });
    }

    fn open_element(&mut self, name: &str, attribute_text: &str, slash: bool) {
        let name = name.to_ascii_lowercase();

        if self.config.is_block(&name) {
            while let Some(top) = self
                .stack
                .last()
                .filter(|top| self.config.is_inline(top))
                .cloned()
            {
                self.close_element(Some(&top));
            }
        }

        if self.config.is_self_closing(&name) && self.stack.last() == Some(&name) {
            self.close_element(Some(&name));
        }

        let unary = !self.config.is_raw_content(&name) && (self.config.is_void(&name) || slash);
        if !unary {
            self.stack.push(name.clone());
        }

        let attributes = parse_attributes(attribute_text, self.config);
        self.emit(Token::StartTag {
            name,
            attributes,
            self_closing: unary,
        });
    }

    /// Close the nearest open element named `name` and everything opened after
    /// it, emitting an end tag for each, innermost first. `None` closes every
    /// open element. A name that is not open is ignored.
    fn close_element(&mut self, name: Option<&str>) {
        let position = match name {
            None => Some(0),
            Some(name) => self.stack.iter().rposition(|open| open == name),
        };
        let Some(position) = position else {
            log::trace!(target: "scour::tokenizer", "ignoring dangling end tag {name:?}");
            return;
        };

        for name in self.stack.split_off(position).into_iter().rev() {
            self.emit(Token::EndTag { name });
        }
    }
}

impl Iterator for MarkupTokenizer<'_> {
    type Item = Result<Token, MalformedInputError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.finished {
                return None;
            }
            if let Err(error) = self.step() {
                self.finished = true;
                return Some(Err(error));
            }
        }
    }
}
