//! `[build.slug]` configuration for permalink placeholder values.

use serde::{Deserialize, Serialize};

/// Slug generation mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Full slugify: Unicode → ASCII, lowercase, use separator.
    Full,
    /// Safe mode: remove dangerous chars, preserve Unicode, use separator (default).
    #[default]
    Safe,
    /// ASCII mode: transliterate Unicode → ASCII, use separator.
    Ascii,
    /// No modification; preserve original text.
    No,
}

/// Case transformation mode for slugs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugCase {
    #[default]
    Lower,
    Upper,
    /// Capitalize each word (Title Case).
    Capitalize,
    Preserve,
}

/// Separator character for slugs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugSeparator {
    #[default]
    Dash,
    Underscore,
}

impl SlugSeparator {
    /// Get the character representation.
    pub const fn as_char(&self) -> char {
        match self {
            Self::Dash => '-',
            Self::Underscore => '_',
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    /// Slugify permalink placeholder values.
    pub path: SlugMode,
    /// Separator character for spaces.
    pub separator: SlugSeparator,
    /// Case transformation.
    pub case: SlugCase,
}
