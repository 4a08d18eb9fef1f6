//! Input normalization.
//!
//! Every matcher in the cascade compares against a [`NormalizedMessage`]:
//! the raw line lowercased and stripped of surrounding whitespace.
//! Lowercasing is Unicode-aware, so "HÉLLO" and "héllo" normalize the same
//! way. Inner whitespace is left alone.

use std::fmt;

/// A lowercased, trimmed, non-empty user message.
///
/// The only constructor returns `None` for blank input, so the cascade can
/// never be asked to classify an empty message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedMessage(String);

impl NormalizedMessage {
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(NormalizedMessage(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring containment, the match primitive of the small-talk and FAQ
    /// tiers.
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

impl AsRef<str> for NormalizedMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
