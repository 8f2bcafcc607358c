//! Inline style sanitizer for scour.
//!
//! # Scope
//!
//! This crate cleans the text of a single `style="..."` attribute:
//! - **Structural gate** - `url(...)` calls are removed outright, then the text
//!   must pass a conservative character allowlist and look like a list of
//!   `name: value;` declarations, or it is rejected as malformed
//! - **Value filtering** - each whitespace-separated value token must be a
//!   number, length, hex or `rgb()` color, or a whitelisted keyword
//! - **Property filtering** - declarations survive only if their property is
//!   whitelisted and at least one value token survived
//!
//! # Not Implemented
//!
//! - Stylesheets, selectors, at-rules
//! - Escapes and comments inside declarations (rejected by the gate)

/// Declaration-list sanitizer.
pub mod sanitizer;
/// Value token grammar.
pub mod values;

pub use sanitizer::{SanitizedDeclarations, sanitize_declarations, sanitize_style};
pub use values::{ValueKind, classify_value};
