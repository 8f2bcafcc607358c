//! The allowlist policy a sanitizer pass enforces.
//!
//! Assembling a policy from an application's settings is the caller's job;
//! this module only defines the value type, a JSON loader, and a conservative
//! built-in default.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "address", "b", "bdo", "big", "blockquote", "br", "caption", "center",
    "cite", "code", "col", "colgroup", "dd", "del", "dfn", "dir", "div", "dl", "dt", "em", "font",
    "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "ins", "kbd", "li", "map", "area",
    "menu", "ol", "p", "pre", "q", "s", "samp", "small", "span", "strike", "strong", "sub", "sup",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "tt", "u", "ul", "var",
];

const DEFAULT_ATTRIBUTES: &[&str] = &[
    "abbr", "align", "alt", "axis", "bgcolor", "border", "cellpadding", "cellspacing", "char",
    "charoff", "cite", "class", "clear", "color", "cols", "colspan", "compact", "coords",
    "datetime", "dir", "face", "headers", "height", "href", "hreflang", "hspace", "id", "ismap",
    "lang", "name", "noshade", "nowrap", "rel", "rev", "rows", "rowspan", "rules", "scope",
    "shape", "size", "span", "src", "start", "style", "summary", "tabindex", "target", "title",
    "type", "valign", "value", "vspace", "width",
];

const DEFAULT_URL_SCHEMES: &[&str] = &["http", "https", "ftp", "mailto"];

const DEFAULT_URL_ATTRIBUTES: &[&str] = &[
    "action", "background", "cite", "codebase", "data", "dynsrc", "href", "longdesc", "lowsrc",
    "poster", "src", "usemap", "xlink:href",
];

const DEFAULT_CSS_PROPERTIES: &[&str] = &[
    "background-color", "border", "border-bottom", "border-collapse", "border-color",
    "border-left", "border-right", "border-spacing", "border-style", "border-top",
    "border-width", "clear", "color", "display", "float", "font", "font-family", "font-size",
    "font-style", "font-variant", "font-weight", "height", "letter-spacing", "line-height",
    "list-style-type", "margin", "margin-bottom", "margin-left", "margin-right", "margin-top",
    "padding", "padding-bottom", "padding-left", "padding-right", "padding-top", "text-align",
    "text-decoration", "text-indent", "vertical-align", "white-space", "width",
];

const DEFAULT_CSS_KEYWORDS: &[&str] = &[
    "!important", "aqua", "auto", "black", "block", "blue", "bold", "both", "bottom", "brown",
    "center", "collapse", "dashed", "dotted", "fuchsia", "gray", "green", "inherit", "inline",
    "italic", "justify", "left", "lime", "maroon", "medium", "middle", "navy", "none", "normal",
    "nowrap", "olive", "pointer", "purple", "red", "right", "silver", "solid", "teal", "top",
    "transparent", "underline", "white", "yellow",
];

static DEFAULT_POLICY: LazyLock<WhitelistConfig> = LazyLock::new(|| WhitelistConfig {
    tags: to_set(DEFAULT_TAGS),
    attributes: to_set(DEFAULT_ATTRIBUTES),
    url_schemes: to_set(DEFAULT_URL_SCHEMES),
    url_attributes: to_set(DEFAULT_URL_ATTRIBUTES),
    css_properties: to_set(DEFAULT_CSS_PROPERTIES),
    css_keywords: to_set(DEFAULT_CSS_KEYWORDS),
});

fn to_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|&name| name.to_string()).collect()
}

/// Sets of names a sanitizer pass lets through.
///
/// All names are compared against lowercased input, so they should be stored in
/// lowercase. A pass holds a shared borrow of the policy for its whole duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitelistConfig {
    /// Tags whose markers are reproduced.
    pub tags: BTreeSet<String>,
    /// Attributes reproduced on allowed tags.
    pub attributes: BTreeSet<String>,
    /// Schemes a URL-bearing attribute may start with.
    pub url_schemes: BTreeSet<String>,
    /// Attributes whose values are URLs and get scheme checks.
    pub url_attributes: BTreeSet<String>,
    /// Properties allowed in inline `style` declarations.
    pub css_properties: BTreeSet<String>,
    /// Non-numeric value tokens allowed in inline `style` declarations.
    pub css_keywords: BTreeSet<String>,
}

impl Default for WhitelistConfig {
    fn default() -> Self {
        Self::default_policy().clone()
    }
}

impl WhitelistConfig {
    /// The process-wide built-in policy.
    #[must_use]
    pub fn default_policy() -> &'static Self {
        &DEFAULT_POLICY
    }

    /// A policy that allows nothing at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            tags: BTreeSet::new(),
            attributes: BTreeSet::new(),
            url_schemes: BTreeSet::new(),
            url_attributes: BTreeSet::new(),
            css_properties: BTreeSet::new(),
            css_keywords: BTreeSet::new(),
        }
    }

    /// Load a policy from a JSON document.
    ///
    /// Missing keys fall back to the built-in default for that set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is not valid JSON or a key
    /// holds something other than a list of strings.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut policy: Self = serde_json::from_str(json)?;
        policy.normalize();
        Ok(policy)
    }

    /// Replace the allowed tag set.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = collect_lowercase(tags);
        self
    }

    /// Replace the allowed attribute set.
    #[must_use]
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = collect_lowercase(attributes);
        self
    }

    /// Replace the allowed URL scheme set.
    #[must_use]
    pub fn with_url_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.url_schemes = collect_lowercase(schemes);
        self
    }

    /// Replace the set of URL-bearing attributes.
    #[must_use]
    pub fn with_url_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.url_attributes = collect_lowercase(attributes);
        self
    }

    /// Replace the allowed style property set.
    #[must_use]
    pub fn with_css_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.css_properties = collect_lowercase(properties);
        self
    }

    /// Replace the allowed style keyword set.
    #[must_use]
    pub fn with_css_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.css_keywords = collect_lowercase(keywords);
        self
    }

    /// Whether `tag` may appear in output.
    #[must_use]
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether `attribute` may appear in output.
    #[must_use]
    pub fn allows_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }

    /// Whether `scheme` may start a URL-bearing attribute value.
    #[must_use]
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.url_schemes.contains(scheme)
    }

    /// Whether `attribute` carries a URL.
    #[must_use]
    pub fn is_url_attribute(&self, attribute: &str) -> bool {
        self.url_attributes.contains(attribute)
    }

    fn normalize(&mut self) {
        for set in [
            &mut self.tags,
            &mut self.attributes,
            &mut self.url_schemes,
            &mut self.url_attributes,
            &mut self.css_properties,
            &mut self.css_keywords,
        ] {
            *set = std::mem::take(set)
                .into_iter()
                .map(|name| name.to_lowercase())
                .collect();
        }
    }
}

fn collect_lowercase<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(|name| name.into().to_lowercase())
        .collect()
}
