//! Markup tokenizer and whitelist sanitizer for scour.
//!
//! # Scope
//!
//! This crate implements:
//! - **Classification tables** - void, block, inline, self-closing, raw-content
//!   and verbatim element sets plus boolean attributes, as immutable values
//! - **Tokenizer** - a cursor-based, stack-driven tokenizer that accepts any
//!   input, recovers from malformed markup with simple heuristics, and always
//!   makes forward progress
//!   - Start/end tags with implicit closing of inline and self-closing elements
//!   - Comments, verbatim bodies, and raw-escape bodies (`script`, `style`, ...)
//!   - Attribute parsing with boolean attribute defaults
//!
//! - **HTML sanitizer** - rebuilds markup keeping only whitelisted tags,
//!   attributes and URL schemes, cleans inline styles, and reports a severity
//!
//! - **Serializers** - tag-balanced generic markup, and injection into a host
//!   tree through [`scour_dom::TreeSink`]
//!
//! # Not Implemented
//!
//! - HTML5 tree-construction error recovery (adoption agency, foster parenting)
//! - Character reference decoding in text (references pass through untouched)

/// Element classification tables.
pub mod classification;
/// Character reference decoding used by URL checks.
pub mod entities;
/// Whitelist sanitizer.
pub mod sanitizer;
/// Generic markup and tree serialization.
pub mod serialize;
/// Markup tokenizer.
pub mod tokenizer;

pub use classification::ClassificationConfig;
pub use sanitizer::{HtmlSanitizer, SanitizeResult, sanitize_html};
pub use serialize::{inject_into_tree, to_generic_markup};
pub use tokenizer::{Attribute, MarkupTokenizer, Token, TokenHandler, parse};
