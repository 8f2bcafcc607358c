//! Element classification tables.
//!
//! The tokenizer's recovery heuristics are driven entirely by these sets. The
//! defaults follow HTML 4.01. A [`ClassificationConfig`] is immutable once
//! built: overrides produce a new value and never touch the shared default.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Elements with no body and no end tag.
const VOID: &[&str] = &[
    "area", "base", "basefont", "br", "col", "frame", "hr", "img", "input", "isindex", "link",
    "meta", "param", "embed",
];

/// Block-level elements; opening one closes open inline elements.
const BLOCK: &[&str] = &[
    "address", "applet", "blockquote", "button", "center", "dd", "del", "dir", "div", "dl", "dt",
    "fieldset", "form", "frameset", "hr", "iframe", "ins", "isindex", "li", "map", "menu",
    "noframes", "noscript", "object", "ol", "p", "pre", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr", "ul",
];

/// Inline elements.
const INLINE: &[&str] = &[
    "a", "abbr", "acronym", "applet", "b", "basefont", "bdo", "big", "br", "button", "cite",
    "code", "del", "dfn", "em", "font", "i", "iframe", "img", "input", "ins", "kbd", "label",
    "map", "object", "q", "s", "samp", "select", "small", "span", "strike", "strong", "sub",
    "sup", "textarea", "tt", "u", "var",
];

/// Elements that may be left open and close themselves when reopened.
const SELF_CLOSING: &[&str] = &[
    "colgroup", "dd", "dt", "li", "options", "p", "td", "tfoot", "th", "thead", "tr",
];

/// Attributes whose missing value defaults to their own name.
const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "checked", "compact", "declare", "defer", "disabled", "ismap", "multiple", "nohref",
    "noresize", "noshade", "nowrap", "readonly", "selected",
];

/// Elements whose body is captured literally and never reproduced.
const RAW_CONTENT: &[&str] = &["script", "style", "object", "applet", "embed", "form"];

static DEFAULT_TABLES: LazyLock<ClassificationConfig> = LazyLock::new(|| ClassificationConfig {
    void: to_set(VOID),
    block: to_set(BLOCK),
    inline: to_set(INLINE),
    self_closing: to_set(SELF_CLOSING),
    raw_content: to_set(RAW_CONTENT),
    verbatim: HashSet::new(),
    boolean_attributes: to_set(BOOLEAN_ATTRIBUTES),
});

fn to_set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|&name| name.to_string()).collect()
}

fn collect_lowercase<I, S>(names: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().to_ascii_lowercase())
        .collect()
}

/// Named sets of tag names (plus boolean attribute names) steering the
/// tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationConfig {
    void: HashSet<String>,
    block: HashSet<String>,
    inline: HashSet<String>,
    self_closing: HashSet<String>,
    raw_content: HashSet<String>,
    verbatim: HashSet<String>,
    boolean_attributes: HashSet<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self::default_tables().clone()
    }
}

macro_rules! override_set {
    ($(#[$doc:meta])* $method:ident, $field:ident) => {
        $(#[$doc])*
        #[must_use]
        pub fn $method<I, S>(mut self, names: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: AsRef<str>,
        {
            self.$field = collect_lowercase(names);
            self
        }
    };
}

impl ClassificationConfig {
    /// The process-wide HTML 4.01 tables.
    #[must_use]
    pub fn default_tables() -> &'static Self {
        &DEFAULT_TABLES
    }

    override_set!(
        /// Replace the void element set.
        with_void, void
    );
    override_set!(
        /// Replace the block element set.
        with_block, block
    );
    override_set!(
        /// Replace the inline element set.
        with_inline, inline
    );
    override_set!(
        /// Replace the set of elements that close themselves when reopened.
        with_self_closing, self_closing
    );
    override_set!(
        /// Replace the raw-content (escape) element set.
        with_raw_content, raw_content
    );
    override_set!(
        /// Replace the verbatim element set.
        with_verbatim, verbatim
    );
    override_set!(
        /// Replace the boolean attribute set.
        with_boolean_attributes, boolean_attributes
    );

    /// Element has no body and no end tag.
    #[must_use]
    pub fn is_void(&self, tag: &str) -> bool {
        self.void.contains(tag)
    }

    /// Opening this element implicitly closes open inline elements.
    #[must_use]
    pub fn is_block(&self, tag: &str) -> bool {
        self.block.contains(tag)
    }

    /// Element is closed implicitly when a block element opens.
    #[must_use]
    pub fn is_inline(&self, tag: &str) -> bool {
        self.inline.contains(tag)
    }

    /// Opening this element directly inside another of the same name closes
    /// the outer one first.
    #[must_use]
    pub fn is_self_closing(&self, tag: &str) -> bool {
        self.self_closing.contains(tag)
    }

    /// Element body is captured literally as a raw-escape token and its
    /// closure emits no end tag.
    #[must_use]
    pub fn is_raw_content(&self, tag: &str) -> bool {
        self.raw_content.contains(tag)
    }

    /// Element body is passed on as text after comment and CDATA markers are
    /// unwrapped.
    #[must_use]
    pub fn is_verbatim(&self, tag: &str) -> bool {
        self.verbatim.contains(tag)
    }

    /// A missing value for this attribute defaults to the attribute's name.
    #[must_use]
    pub fn is_boolean_attribute(&self, name: &str) -> bool {
        self.boolean_attributes.contains(name)
    }
}
