//! Transcript seam.
//!
//! The controller never touches UI state directly; it writes to a
//! [`Transcript`] owned by the caller. All text arrives as [`SafeHtml`].

use crate::SafeHtml;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

impl Author {
    /// CSS class used by the chat widget markup.
    pub fn css_class(self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Message,
    /// The transient "is typing..." placeholder.
    Typing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub author: Author,
    pub kind: EntryKind,
    pub html: SafeHtml,
}

/// Where a conversation is displayed.
///
/// Implementations must be cheap and non-blocking: they are called from the
/// submit path and from reply tasks.
pub trait Transcript: Send + Sync {
    /// Append an entry at the end and return its id.
    fn append(&self, author: Author, kind: EntryKind, html: SafeHtml) -> EntryId;

    /// Remove an entry. Returns false if it was already gone.
    fn remove(&self, id: EntryId) -> bool;

    /// Bring the latest entry into view.
    fn scroll_to_bottom(&self);
}

impl<T: Transcript + ?Sized> Transcript for Arc<T> {
    fn append(&self, author: Author, kind: EntryKind, html: SafeHtml) -> EntryId {
        (**self).append(author, kind, html)
    }

    fn remove(&self, id: EntryId) -> bool {
        (**self).remove(id)
    }

    fn scroll_to_bottom(&self) {
        (**self).scroll_to_bottom()
    }
}

/// An in-memory transcript. Used by tests and by front ends that render
/// the whole conversation at once.
#[derive(Debug, Default)]
pub struct MemoryTranscript {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<Entry>,
    next_id: u64,
    scrolls: usize,
    at_bottom: bool,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.lock().entries.clone()
    }

    /// Displayed text of every finished message, typing placeholders
    /// excluded.
    pub fn messages(&self) -> Vec<(Author, String)> {
        self.lock()
            .entries
            .iter()
            .filter(|e| e.kind == EntryKind::Message)
            .map(|e| (e.author, e.html.to_text().into_owned()))
            .collect()
    }

    /// Kind of the entry with `id`, if it is still in the transcript.
    pub fn kind_of(&self, id: EntryId) -> Option<EntryKind> {
        self.lock().entries.iter().find(|e| e.id == id).map(|e| e.kind)
    }

    /// Number of typing placeholders currently shown.
    pub fn typing_count(&self) -> usize {
        self.lock().entries.iter().filter(|e| e.kind == EntryKind::Typing).count()
    }

    pub fn scroll_count(&self) -> usize {
        self.lock().scrolls
    }

    /// True if no entry was appended since the last scroll.
    pub fn is_at_bottom(&self) -> bool {
        let inner = self.lock();
        inner.entries.is_empty() || inner.at_bottom
    }

    /// Render the conversation as chat widget markup.
    pub fn render_html(&self) -> String {
        let inner = self.lock();
        let mut out = String::new();
        for entry in &inner.entries {
            let body = match entry.kind {
                EntryKind::Message => entry.html.to_string(),
                EntryKind::Typing => format!("<em class=\"typing\">{}</em>", entry.html),
            };
            let _ = writeln!(
                out,
                "<div class=\"chat-message {}\"><div class=\"chat-text\">{}</div></div>",
                entry.author.css_class(),
                body
            );
        }
        out
    }
}

impl Transcript for MemoryTranscript {
    fn append(&self, author: Author, kind: EntryKind, html: SafeHtml) -> EntryId {
        let mut inner = self.lock();
        let id = EntryId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push(Entry { id, author, kind, html });
        inner.at_bottom = false;
        id
    }

    fn remove(&self, id: EntryId) -> bool {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|e| e.id != id);
        inner.entries.len() != before
    }

    fn scroll_to_bottom(&self) {
        let mut inner = self.lock();
        inner.scrolls += 1;
        inner.at_bottom = true;
    }
}
