//! How aggressively a sanitizer pass altered its input.

use strum_macros::Display;

/// Severity watermark of a sanitizer pass.
///
/// Ordered so that `max` over individual contributions yields the pass result;
/// a pass never lowers its watermark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Severity {
    /// Only cosmetic normalization: empty attributes removed, tags closed,
    /// whitespace collapsed.
    #[default]
    Cosmetic,
    /// A disallowed tag, attribute, URL scheme, or style value was dropped.
    Filtered,
    /// The body of a raw-content element (`script`, `object`, ...) was discarded.
    RawContentDiscarded,
}

impl Severity {
    /// Numeric code: 0, 1 or 2.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Cosmetic => 0,
            Self::Filtered => 1,
            Self::RawContentDiscarded => 2,
        }
    }

    /// Raise the watermark to at least `other`.
    pub fn raise(&mut self, other: Self) {
        if other > *self {
            *self = other;
        }
    }
}

/// How much sanitization a caller asks for.
///
/// `Off` and `Disabled` both pass input through untouched; `Markup` filters tags
/// and attributes; `MarkupAndStyles` additionally filters inline `style`
/// declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum SanitizationLevel {
    /// Level 0.
    Off,
    /// Level 1.
    Markup,
    /// Level 2.
    MarkupAndStyles,
    /// Level 3.
    Disabled,
}

impl SanitizationLevel {
    /// Numeric level: 0 to 3.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Markup => 1,
            Self::MarkupAndStyles => 2,
            Self::Disabled => 3,
        }
    }

    /// Whether this level runs the sanitizer at all.
    #[must_use]
    pub const fn filters(self) -> bool {
        matches!(self, Self::Markup | Self::MarkupAndStyles)
    }
}

impl TryFrom<u8> for SanitizationLevel {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::Markup),
            2 => Ok(Self::MarkupAndStyles),
            3 => Ok(Self::Disabled),
            other => Err(other),
        }
    }
}
