//! Markup tokenizer.
//!
//! A lenient, stack-driven tokenizer for untrusted fragments. It keeps a stack
//! of open elements, closes elements implicitly where HTML 4 authors expect it,
//! and turns anything that does not look like a tag into text. It never rejects
//! input for being malformed; the only failure is a loss of forward progress.

/// Attribute text parsing.
pub mod attributes;
/// Tokenizer state machine.
pub mod core;
/// Callback-style driver.
pub mod handler;
/// Input scanning helpers.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use attributes::parse_attributes;
pub use self::core::{MarkupTokenizer, TokenizerState};
pub use handler::{TokenHandler, parse};
pub use token::{Attribute, Token};
