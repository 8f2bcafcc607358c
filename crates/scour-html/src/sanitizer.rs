//! Whitelist sanitizer.
//!
//! Rebuilds markup from the token stream, keeping only what the
//! [`WhitelistConfig`] allows:
//!
//! - Disallowed tags lose their markers but their content is still processed,
//!   so a disallowed container is unwrapped rather than removed.
//! - Attributes must be whitelisted; URL-bearing ones are stripped of invisible
//!   characters and must not start with a disallowed scheme.
//! - At [`SanitizationLevel::MarkupAndStyles`], `style` attributes are cleaned
//!   by the declaration sanitizer in `scour_css`, whether or not `style` is in
//!   the attribute whitelist.
//! - Comments are dropped and raw-content bodies (`script`, `object`, ...) are
//!   never reproduced.
//!
//! The returned [`Severity`] is the highest contribution of any single change.

use std::borrow::Cow;

use scour_common::warning::warn_once;
use scour_common::{MalformedInputError, SanitizationLevel, Severity, WhitelistConfig};
use scour_css::sanitize_style;

use crate::classification::ClassificationConfig;
use crate::entities::decode_character_references;
use crate::tokenizer::{Attribute, TokenHandler, parse};

/// Attribute carrying the `/` of a `<tag / attr>` style self-closing marker.
const SELF_CLOSING_MARKER: &str = "/";

/// Output of a sanitizer pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeResult {
    /// The rebuilt markup.
    pub markup: String,
    /// How aggressively the input was altered.
    pub severity: Severity,
}

/// A configured sanitizer.
///
/// Holds shared borrows of its tables; one value can sanitize any number of
/// fragments, from any number of threads.
///
/// ```
/// use scour_common::{SanitizationLevel, Severity, WhitelistConfig};
/// use scour_html::HtmlSanitizer;
///
/// let policy = WhitelistConfig::default();
/// let result = HtmlSanitizer::new(&policy)
///     .with_level(SanitizationLevel::Markup)
///     .sanitize("<b onclick=\"x()\">hi</b>")
///     .unwrap();
/// assert_eq!(result.markup, "<b>hi</b>");
/// assert_eq!(result.severity, Severity::Filtered);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HtmlSanitizer<'a> {
    policy: &'a WhitelistConfig,
    classification: &'a ClassificationConfig,
    level: SanitizationLevel,
    strict: bool,
}

impl<'a> HtmlSanitizer<'a> {
    /// A sanitizer enforcing `policy` at [`SanitizationLevel::MarkupAndStyles`]
    /// with the default classification tables, catching style errors.
    #[must_use]
    pub fn new(policy: &'a WhitelistConfig) -> Self {
        Self {
            policy,
            classification: ClassificationConfig::default_tables(),
            level: SanitizationLevel::MarkupAndStyles,
            strict: false,
        }
    }

    /// Use a different sanitization level.
    #[must_use]
    pub const fn with_level(mut self, level: SanitizationLevel) -> Self {
        self.level = level;
        self
    }

    /// In strict mode a malformed `style` attribute aborts the pass instead of
    /// being dropped.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Tokenize with custom classification tables.
    #[must_use]
    pub const fn with_classification(mut self, classification: &'a ClassificationConfig) -> Self {
        self.classification = classification;
        self
    }

    /// Sanitize one fragment.
    ///
    /// Levels that do not filter return `markup` unchanged with
    /// [`Severity::Cosmetic`].
    ///
    /// # Errors
    ///
    /// Returns [`MalformedInputError::Stalled`] if the tokenizer loses forward
    /// progress, or the style sanitizer's error for a malformed `style`
    /// attribute in strict mode.
    pub fn sanitize(&self, markup: &str) -> Result<SanitizeResult, MalformedInputError> {
        if !self.level.filters() {
            return Ok(SanitizeResult {
                markup: markup.to_string(),
                severity: Severity::Cosmetic,
            });
        }

        let mut pass = SanitizerPass {
            settings: self,
            output: String::with_capacity(markup.len()),
            severity: Severity::Cosmetic,
        };
        parse(markup, &mut pass, self.classification)?;

        Ok(SanitizeResult {
            markup: pass.output,
            severity: pass.severity,
        })
    }
}

/// Sanitize `markup` against `policy` with the default classification tables.
///
/// # Errors
///
/// See [`HtmlSanitizer::sanitize`].
pub fn sanitize_html(
    markup: &str,
    level: SanitizationLevel,
    policy: &WhitelistConfig,
    strict: bool,
) -> Result<SanitizeResult, MalformedInputError> {
    HtmlSanitizer::new(policy)
        .with_level(level)
        .with_strict(strict)
        .sanitize(markup)
}

/// Mutable state of one sanitizer run.
struct SanitizerPass<'s, 'a> {
    settings: &'s HtmlSanitizer<'a>,
    output: String,
    severity: Severity,
}

impl SanitizerPass<'_, '_> {
    fn filtered(&mut self) {
        self.severity.raise(Severity::Filtered);
    }

    fn push_attribute(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.output.push(' ');
        self.output.push_str(name);
        self.output.push_str("=\"");
        self.output.push_str(&quote_attribute_value(value));
        self.output.push('"');
    }

    fn style_attribute(&mut self, attribute: &Attribute) -> Result<(), MalformedInputError> {
        match sanitize_style(&attribute.escaped, self.settings.policy) {
            Ok(declarations) => {
                self.severity.raise(declarations.severity);
                self.push_attribute(&attribute.name, &declarations.cleaned);
                Ok(())
            }
            Err(error) if self.settings.strict => Err(error),
            Err(error) => {
                log::debug!("dropping style attribute: {error}");
                let _ = warn_once("CSS", "dropping malformed style attributes");
                self.filtered();
                Ok(())
            }
        }
    }

    fn url_attribute(&mut self, attribute: &Attribute) {
        let cleaned = strip_invisible(&attribute.escaped);
        let decoded = strip_invisible(&decode_character_references(&cleaned).to_lowercase());

        let disallowed = [cleaned.as_str(), decoded.as_str()]
            .into_iter()
            .filter_map(leading_scheme)
            .find(|scheme| !self.settings.policy.allows_scheme(scheme));
        if let Some(scheme) = disallowed {
            log::debug!("dropping {} with disallowed scheme {scheme:?}", attribute.name);
            self.filtered();
            return;
        }

        self.push_attribute(&attribute.name, &cleaned);
    }
}

impl TokenHandler for SanitizerPass<'_, '_> {
    fn on_start(
        &mut self,
        name: &str,
        attributes: &[Attribute],
        unary: bool,
    ) -> Result<(), MalformedInputError> {
        let policy = self.settings.policy;
        if !policy.allows_tag(name) {
            log::debug!("unwrapping disallowed element <{name}>");
            let _ = warn_once("HTML", "unwrapping disallowed elements");
            self.filtered();
            return Ok(());
        }

        self.output.push('<');
        self.output.push_str(name);

        for attribute in attributes {
            if attribute.name == SELF_CLOSING_MARKER {
                // Already reflected by `unary`.
                continue;
            }
            if attribute.name == "style"
                && self.settings.level == SanitizationLevel::MarkupAndStyles
            {
                // Styles are governed by the CSS policy, not the attribute list.
                self.style_attribute(attribute)?;
            } else if !policy.allows_attribute(&attribute.name) {
                log::debug!("dropping attribute {} of <{name}>", attribute.name);
                self.filtered();
            } else if policy.is_url_attribute(&attribute.name) {
                self.url_attribute(attribute);
            } else {
                self.push_attribute(&attribute.name, &attribute.escaped);
            }
        }

        self.output.push_str(if unary { "/>" } else { ">" });
        Ok(())
    }

    fn on_end(&mut self, name: &str) -> Result<(), MalformedInputError> {
        if self.settings.policy.allows_tag(name) {
            self.output.push_str("</");
            self.output.push_str(name);
            self.output.push('>');
        }
        Ok(())
    }

    fn on_text(&mut self, text: &str) -> Result<(), MalformedInputError> {
        self.output.push_str(text);
        Ok(())
    }

    fn on_raw_escape(&mut self, text: &str, name: &str) -> Result<(), MalformedInputError> {
        log::debug!("discarding {} bytes of <{name}> content", text.len());
        self.severity.raise(Severity::RawContentDiscarded);
        Ok(())
    }
}

/// Characters removed from URL-bearing attribute values before the scheme
/// check: backtick, C0 controls and space, DEL through NBSP, any other
/// whitespace, U+FFFD, and zero-width characters.
const fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '`' | '\u{0}'..='\u{20}'
            | '\u{7F}'..='\u{A0}'
            | '\u{FFFD}'
            | '\u{200B}'..='\u{200D}'
            | '\u{2060}'
            | '\u{FEFF}'
    )
}

fn strip_invisible(value: &str) -> String {
    value
        .chars()
        .filter(|&c| !is_invisible(c) && !c.is_whitespace())
        .collect()
}

/// The `scheme` of a value starting with `scheme:`, where the scheme is a
/// lowercase letter or digit followed by letters, digits, `-`, `+` or `.`.
fn leading_scheme(value: &str) -> Option<&str> {
    let (scheme, _) = value.split_once(':')?;
    let mut bytes = scheme.bytes();
    let first = bytes.next()?;
    let valid = (first.is_ascii_lowercase() || first.is_ascii_digit())
        && bytes.all(|b| {
            b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.')
        });
    valid.then_some(scheme)
}

/// Write double quotes as `&quot;` so a value cannot leave its quoted context.
/// Backslash-escaped quotes lose their backslash.
fn quote_attribute_value(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace("\\\"", "&quot;").replace('"', "&quot;"))
    } else {
        Cow::Borrowed(value)
    }
}
