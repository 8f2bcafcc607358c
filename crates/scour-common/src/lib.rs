//! Common types for the scour sanitizer.
//!
//! This crate provides the pieces shared by every scour component:
//! - **Errors** - [`MalformedInputError`] raised on tokenizer stalls and
//!   structurally invalid style text, [`ConfigError`] for policy loading
//! - **Severity** - the watermark reporting how aggressively input was altered
//! - **Whitelist policy** - the injected, read-only [`WhitelistConfig`]
//! - **Warning System** - deduplicated warnings routed through `log`

/// Error types shared across components.
pub mod error;
/// Severity watermark and sanitization levels.
pub mod severity;
/// Deduplicated warnings.
pub mod warning;
/// Allowlist policy consumed by the sanitizers.
pub mod whitelist;

pub use error::{ConfigError, MalformedInputError};
pub use severity::{SanitizationLevel, Severity};
pub use whitelist::WhitelistConfig;
