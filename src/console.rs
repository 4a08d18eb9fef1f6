use crate::debug_report::ansi;
use scoresight_assistant::{Author, EntryId, EntryKind, MemoryTranscript, SafeHtml, Transcript};
use std::io::{self, Write};

/// Terminal transcript.
///
/// Entries are recorded in a [`MemoryTranscript`] (for `--html`) and printed
/// as they arrive. On a live terminal the typing placeholder is drawn on its
/// own line and erased in place when the reply replaces it.
pub struct ConsoleTranscript {
    record: MemoryTranscript,
    palette: ansi::Palette,
    live: bool,
    echo_user: bool,
}

impl ConsoleTranscript {
    pub fn new(color: bool, live: bool, echo_user: bool) -> Self {
        ConsoleTranscript { record: MemoryTranscript::new(), palette: ansi::Palette::new(color), live, echo_user }
    }

    pub fn record(&self) -> &MemoryTranscript {
        &self.record
    }

    fn print(&self, author: Author, kind: EntryKind, html: &SafeHtml) {
        let text = html.to_text();
        let mut out = io::stdout().lock();
        let _ = match (author, kind) {
            (Author::User, _) => writeln!(out, "{} {}", self.palette.paint("you ›", ansi::BLUE), text),
            (Author::Bot, EntryKind::Message) => {
                writeln!(out, "{} {}", self.palette.bold(self.palette.paint("bot ›", ansi::GREEN)), text)
            }
            (Author::Bot, EntryKind::Typing) => write!(out, "{}", self.palette.dim(text)),
        };
    }
}

impl Transcript for ConsoleTranscript {
    fn append(&self, author: Author, kind: EntryKind, html: SafeHtml) -> EntryId {
        let visible = match (author, kind) {
            (Author::User, _) => self.echo_user,
            (Author::Bot, EntryKind::Typing) => self.live,
            (Author::Bot, EntryKind::Message) => true,
        };
        if visible {
            self.print(author, kind, &html);
        }
        self.record.append(author, kind, html)
    }

    fn remove(&self, id: EntryId) -> bool {
        let was_typing = self.record.kind_of(id) == Some(EntryKind::Typing);
        if was_typing && self.live {
            // Erase the placeholder line.
            let _ = write!(io::stdout().lock(), "\r\x1b[2K");
        }
        self.record.remove(id)
    }

    fn scroll_to_bottom(&self) {
        let _ = io::stdout().flush();
        self.record.scroll_to_bottom();
    }
}
