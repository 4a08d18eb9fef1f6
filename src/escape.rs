//! HTML-safe rendering of transcript text.
//!
//! Transcripts only accept [`SafeHtml`], and the only way to obtain one is
//! [`escape_html`]. User text and bot replies therefore both pass through
//! escaping before they reach any markup.

use std::borrow::Cow;
use std::fmt;

/// Text with `& < > " '` replaced by character references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decode the references produced by [`escape_html`], i.e. what a
    /// browser would display for this markup fragment. Plain-text front ends
    /// use this to render transcript entries.
    pub fn to_text(&self) -> Cow<'_, str> {
        if !self.0.contains('&') {
            return Cow::Borrowed(&self.0);
        }

        let mut out = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();
        while let Some(pos) = rest.find('&') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];
            match ENTITIES.iter().find(|(_, entity)| rest.starts_with(entity)) {
                Some((ch, entity)) => {
                    out.push(*ch);
                    rest = &rest[entity.len()..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            }
        }
        out.push_str(rest);
        Cow::Owned(out)
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const ENTITIES: [(char, &str); 5] = [('&', "&amp;"), ('<', "&lt;"), ('>', "&gt;"), ('"', "&quot;"), ('\'', "&#039;")];

/// Escape `text` for insertion into markup.
pub fn escape_html(text: &str) -> SafeHtml {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ENTITIES.iter().find(|(c, _)| *c == ch) {
            Some((_, entity)) => out.push_str(entity),
            None => out.push(ch),
        }
    }
    SafeHtml(out)
}
