use thiserror::Error;

/// Input the sanitizer refuses to process.
///
/// The tokenizer raises this only when it fails to make forward progress; ugly
/// but recoverable markup never produces it. The style sanitizer raises it when
/// declaration text fails one of its structural allowlist checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInputError {
    /// A tokenizer iteration consumed no input.
    #[error("parse error: no progress at byte {position} near {remaining:?}")]
    Stalled {
        /// Byte offset of the cursor when the stall was detected.
        position: usize,
        /// Up to 32 characters of the unconsumed input, for diagnostics.
        remaining: String,
    },

    /// Style text contains characters or shapes outside the allowed set.
    #[error("parse error: style text contains disallowed characters: {0:?}")]
    DisallowedCharacters(String),

    /// Style text is not a sequence of `name: value;` declarations.
    #[error("parse error: style text is not a declaration list: {0:?}")]
    NotDeclarationList(String),
}

impl MalformedInputError {
    /// Build a [`MalformedInputError::Stalled`] for the given cursor position.
    #[must_use]
    pub fn stalled(position: usize, remaining: &str) -> Self {
        Self::Stalled {
            position,
            remaining: remaining.chars().take(32).collect(),
        }
    }
}

/// Failure to load a [`crate::WhitelistConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The policy document is not valid JSON or has the wrong shape.
    #[error("invalid whitelist policy: {0}")]
    Json(#[from] serde_json::Error),
}
