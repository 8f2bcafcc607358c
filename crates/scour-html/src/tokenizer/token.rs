use std::fmt;

/// An attribute of a start tag.
///
/// Names and values are lowercased when parsed; the original case is not
/// recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercase attribute name.
    pub name: String,
    /// Lowercase attribute value.
    pub value: String,
    /// `value` with every double quote not already preceded by a backslash
    /// prefixed with one.
    pub escaped: String,
}

impl Attribute {
    /// Create an attribute, deriving `escaped` from `value`.
    #[must_use]
    pub fn new(name: String, value: String) -> Self {
        let escaped = escape_quotes(&value);
        Self {
            name,
            value,
            escaped,
        }
    }
}

fn escape_quotes(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut previous = None;
    for c in value.chars() {
        if c == '"' && previous != Some('\\') {
            escaped.push('\\');
        }
        escaped.push(c);
        previous = Some(c);
    }
    escaped
}

/// One tokenizer event.
///
/// Tokens are produced transiently and own their data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An opened element.
    StartTag {
        /// Lowercase tag name.
        name: String,
        /// Attributes in source order.
        attributes: Vec<Attribute>,
        /// The element has no body: it is void or was written with a trailing
        /// slash, and it is not a raw-content element.
        self_closing: bool,
    },

    /// A closed element, explicit or implied.
    EndTag {
        /// Lowercase tag name.
        name: String,
    },

    /// Character data, passed on exactly as found (or `&lt;` for a stray `<`).
    Text {
        /// The text.
        data: String,
    },

    /// The interior of a `<!-- ... -->` comment.
    Comment {
        /// The comment body.
        data: String,
    },

    /// The literal body of a raw-content element. Its closure emits no
    /// [`Token::EndTag`].
    RawEscape {
        /// Lowercase tag name of the enclosing element.
        name: String,
        /// The body, up to the closing tag.
        data: String,
    },
}

impl Token {
    /// Returns true if this is a start tag with the given name.
    #[must_use]
    pub fn is_start_of(&self, tag: &str) -> bool {
        matches!(self, Self::StartTag { name, .. } if name == tag)
    }

    /// Returns true if this is an end tag with the given name.
    #[must_use]
    pub fn is_end_of(&self, tag: &str) -> bool {
        matches!(self, Self::EndTag { name } if name == tag)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.escaped)?;
                }
                if *self_closing {
                    write!(f, "/")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Text { data } => write!(f, "Text({data:?})"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::RawEscape { name, data } => write!(f, "RawEscape({name}, {data:?})"),
        }
    }
}
