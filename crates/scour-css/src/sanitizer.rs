//! Sanitizer for the text of one inline `style` attribute.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scour_common::{MalformedInputError, Severity, WhitelistConfig};

use crate::values::classify_value;

/// A `url(...)` call with its trailing whitespace. Never permitted.
static URL_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"url\s*\(\s*[^\s)]+?\s*\)\s*").expect("url() pattern is valid")
});

/// Characters and shapes allowed anywhere in the text: a conservative
/// punctuation set, quoted word groups, and parenthesized numeric lists.
static CHARACTER_GATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:[-:,;#%.\sa-zA-Z0-9!]|[A-Za-z0-9_]-[A-Za-z0-9_]|'[\sA-Za-z0-9_]+'|"[\sA-Za-z0-9_]+"|\([0-9,\s]+\))*$"#,
    )
    .expect("character gate pattern is valid")
});

/// A sequence of `name: value;` declarations, the last `;` optional.
static DECLARATION_GATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-A-Za-z0-9_]+\s*:[^:;]*(?:;\s*|$))*$")
        .expect("declaration gate pattern is valid")
});

/// Output of [`sanitize_declarations`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SanitizedDeclarations {
    /// Surviving declarations as `property:value value;...`. May be empty.
    pub cleaned: String,
    /// [`Severity::Filtered`] if any value token or declaration was dropped.
    pub severity: Severity,
}

/// Clean inline style text against the property and keyword allowlists.
///
/// `url(...)` calls are removed before anything else, whatever the whitelists
/// say. The remainder must pass both structural gates. Each declaration keeps
/// the value tokens that are numeric, colors, or whitelisted keywords, and is
/// kept itself only if its property is whitelisted and some value survived.
///
/// # Errors
///
/// Returns [`MalformedInputError::DisallowedCharacters`] or
/// [`MalformedInputError::NotDeclarationList`] when the text fails a
/// structural gate.
pub fn sanitize_declarations(
    text: &str,
    properties: &BTreeSet<String>,
    keywords: &BTreeSet<String>,
) -> Result<SanitizedDeclarations, MalformedInputError> {
    let text = URL_FUNCTION.replace_all(text, " ");

    if !CHARACTER_GATE.is_match(&text) {
        return Err(MalformedInputError::DisallowedCharacters(text.into_owned()));
    }
    if !DECLARATION_GATE.is_match(&text) {
        return Err(MalformedInputError::NotDeclarationList(text.into_owned()));
    }

    let mut result = SanitizedDeclarations::default();

    for declaration in text.split(';') {
        if declaration.trim().is_empty() {
            continue;
        }
        let Some((property, value)) = declaration.split_once(':') else {
            log::debug!("dropping style declaration without a colon: {declaration:?}");
            result.severity.raise(Severity::Filtered);
            continue;
        };
        let property = property.trim();

        let mut kept = Vec::new();
        for token in value.split_whitespace() {
            if classify_value(token, keywords).is_some() {
                kept.push(token);
            } else {
                log::debug!("dropping style value {token:?} of {property:?}");
                result.severity.raise(Severity::Filtered);
            }
        }

        if properties.contains(property) && !kept.is_empty() {
            result.cleaned.push_str(property);
            result.cleaned.push(':');
            result.cleaned.push_str(&kept.join(" "));
            result.cleaned.push(';');
        } else {
            log::debug!("dropping style declaration {property:?}");
            result.severity.raise(Severity::Filtered);
        }
    }

    Ok(result)
}

/// [`sanitize_declarations`] with the property and keyword sets of `policy`.
///
/// # Errors
///
/// See [`sanitize_declarations`].
pub fn sanitize_style(
    text: &str,
    policy: &WhitelistConfig,
) -> Result<SanitizedDeclarations, MalformedInputError> {
    sanitize_declarations(text, &policy.css_properties, &policy.css_keywords)
}
