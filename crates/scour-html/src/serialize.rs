//! Unfiltered serializers.
//!
//! Neither function enforces any policy: they are for markup that is already
//! trusted, or has already been through the sanitizer.

use scour_common::MalformedInputError;
use scour_dom::{AttributesMap, TreeSink};

use crate::classification::ClassificationConfig;
use crate::tokenizer::{Attribute, TokenHandler, parse};

/// Elements a document holds at most one of.
const UNIQUE_ELEMENTS: [&str; 4] = ["html", "head", "body", "title"];

/// Elements that belong in `head` wherever they appear.
const HEAD_ELEMENTS: [&str; 2] = ["link", "base"];

/// Attribute carrying a stray `/` inside a start tag.
const SELF_CLOSING_MARKER: &str = "/";

/// Re-serialize `markup` with every element closed and every attribute
/// double-quoted.
///
/// Implied end tags are written out, unary elements end in `/>`, comments are
/// kept, and raw-content bodies are dropped.
///
/// ```
/// use scour_html::{ClassificationConfig, to_generic_markup};
///
/// let markup = to_generic_markup("<p>Hi<b>there</p>", ClassificationConfig::default_tables());
/// assert_eq!(markup.unwrap(), "<p>Hi<b>there</b></p>");
/// ```
///
/// # Errors
///
/// Returns [`MalformedInputError::Stalled`] if the tokenizer loses forward
/// progress.
pub fn to_generic_markup(
    markup: &str,
    config: &ClassificationConfig,
) -> Result<String, MalformedInputError> {
    let mut writer = MarkupWriter {
        output: String::with_capacity(markup.len()),
    };
    parse(markup, &mut writer, config)?;
    Ok(writer.output)
}

struct MarkupWriter {
    output: String,
}

impl TokenHandler for MarkupWriter {
    fn on_start(
        &mut self,
        name: &str,
        attributes: &[Attribute],
        unary: bool,
    ) -> Result<(), MalformedInputError> {
        self.output.push('<');
        self.output.push_str(name);
        for attribute in attributes
            .iter()
            .filter(|attribute| attribute.name != SELF_CLOSING_MARKER)
        {
            self.output.push(' ');
            self.output.push_str(&attribute.name);
            self.output.push_str("=\"");
            self.output.push_str(&attribute.escaped);
            self.output.push('"');
        }
        self.output.push_str(if unary { "/>" } else { ">" });
        Ok(())
    }

    fn on_end(&mut self, name: &str) -> Result<(), MalformedInputError> {
        self.output.push_str("</");
        self.output.push_str(name);
        self.output.push('>');
        Ok(())
    }

    fn on_text(&mut self, text: &str) -> Result<(), MalformedInputError> {
        self.output.push_str(text);
        Ok(())
    }

    fn on_comment(&mut self, text: &str) -> Result<(), MalformedInputError> {
        self.output.push_str("<!--");
        self.output.push_str(text);
        self.output.push_str("-->");
        Ok(())
    }
}

/// Build the nodes of `markup` into a host tree.
///
/// Content goes into the sink's `body` element if it has one, else into its
/// document node. A start tag for `html`, `head`, `body` or `title` reuses the
/// existing or previously injected element, which becomes the parent of what
/// follows. `link` and `base` elements are appended to `head` when there is
/// one. Comments and raw-content bodies are not injected.
///
/// The sink is searched for existing elements once, before any content is
/// built.
///
/// # Errors
///
/// Returns [`MalformedInputError::Stalled`] if the tokenizer loses forward
/// progress.
pub fn inject_into_tree<S: TreeSink>(
    markup: &str,
    sink: &mut S,
    config: &ClassificationConfig,
) -> Result<(), MalformedInputError> {
    let unique = UNIQUE_ELEMENTS.map(|name| sink.find_element(name));
    let root = unique[BODY].unwrap_or_else(|| sink.document());
    let mut builder = TreeBuilder {
        sink,
        root,
        unique,
        open: Vec::new(),
    };
    parse(markup, &mut builder, config)
}

/// Positions in [`UNIQUE_ELEMENTS`].
const HEAD: usize = 1;
const BODY: usize = 2;

struct TreeBuilder<'s, S: TreeSink> {
    sink: &'s mut S,
    /// Parent for content outside any injected element.
    root: S::Handle,
    /// The host's or injected element for each of [`UNIQUE_ELEMENTS`].
    unique: [Option<S::Handle>; UNIQUE_ELEMENTS.len()],
    /// Injected or reused elements still open, innermost last.
    open: Vec<(String, S::Handle)>,
}

impl<S: TreeSink> TreeBuilder<'_, S> {
    fn current_parent(&self) -> S::Handle {
        self.open.last().map_or(self.root, |&(_, handle)| handle)
    }

    /// Forget the innermost open element named `name` and everything inside it.
    fn close(&mut self, name: &str) {
        if let Some(position) = self.open.iter().rposition(|(open, _)| open == name) {
            self.open.truncate(position);
        }
    }

    fn create(&mut self, name: &str, attributes: &[Attribute]) -> S::Handle {
        let attrs: AttributesMap = attributes
            .iter()
            .filter(|attribute| attribute.name != SELF_CLOSING_MARKER)
            .map(|attribute| (attribute.name.clone(), attribute.value.clone()))
            .collect();
        let element = self.sink.create_element(name, attrs);

        let parent = HEAD_ELEMENTS
            .contains(&name)
            .then_some(self.unique[HEAD])
            .flatten()
            .unwrap_or_else(|| self.current_parent());
        self.sink.append_child(parent, element);
        element
    }
}

impl<S: TreeSink> TokenHandler for TreeBuilder<'_, S> {
    fn on_start(
        &mut self,
        name: &str,
        attributes: &[Attribute],
        unary: bool,
    ) -> Result<(), MalformedInputError> {
        let element = match UNIQUE_ELEMENTS.iter().position(|&unique| unique == name) {
            Some(slot) => match self.unique[slot] {
                Some(existing) => existing,
                None => {
                    let created = self.create(name, attributes);
                    self.unique[slot] = Some(created);
                    created
                }
            },
            None => self.create(name, attributes),
        };

        if !unary {
            self.open.push((name.to_string(), element));
        }
        Ok(())
    }

    fn on_end(&mut self, name: &str) -> Result<(), MalformedInputError> {
        self.close(name);
        Ok(())
    }

    fn on_text(&mut self, text: &str) -> Result<(), MalformedInputError> {
        let parent = self.current_parent();
        let node = self.sink.create_text(text);
        self.sink.append_child(parent, node);
        Ok(())
    }

    fn on_raw_escape(&mut self, _text: &str, name: &str) -> Result<(), MalformedInputError> {
        self.close(name);
        Ok(())
    }
}
