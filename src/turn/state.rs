use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::task::JoinError;
use tokio::time::Instant;

#[derive(Debug, Error)]
pub enum TurnError {
    #[error("invalid turn transition: {event:?} in state {from:?}")]
    InvalidTransition { from: TurnState, event: TurnEvent },

    #[error("turn task failed: {0}")]
    Join(#[from] JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    UserMessagePosted,
    TypingIndicatorShown,
    ReplyResolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    /// Non-empty text was submitted and posted.
    Submit,
    /// The typing placeholder was inserted.
    ShowTyping,
    /// The delay expired and the reply replaced the placeholder.
    Resolve,
    /// Back to idle after a reply.
    Finish,
    /// The pending reply was dropped before it was shown.
    Cancel,
}

impl TurnState {
    /// Pure transition function.
    pub fn next(self, event: TurnEvent) -> Result<TurnState, TurnError> {
        use TurnEvent::*;
        use TurnState::*;

        match (self, event) {
            (Idle, Submit) => Ok(UserMessagePosted),
            (UserMessagePosted, ShowTyping) => Ok(TypingIndicatorShown),
            (TypingIndicatorShown, Resolve) => Ok(ReplyResolved),
            (TypingIndicatorShown, Cancel) => Ok(Idle),
            (ReplyResolved, Finish) => Ok(Idle),
            (from, event) => Err(TurnError::InvalidTransition { from, event }),
        }
    }
}

/// One user message and its reply. Lives only as long as the turn is being
/// delivered; nothing is kept for later messages.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    /// The submitted text, trimmed but otherwise as typed.
    pub user_text: String,
    pub placeholder_shown: bool,
    pub resolved_reply: Option<String>,
    pub created_at: DateTime<Utc>,
    state: TurnState,
    cancelled: bool,
    typing_since: Option<Instant>,
    typing_for: Option<std::time::Duration>,
}

impl ConversationTurn {
    pub(crate) fn new(user_text: impl Into<String>) -> Self {
        ConversationTurn {
            user_text: user_text.into(),
            placeholder_shown: false,
            resolved_reply: None,
            created_at: Utc::now(),
            state: TurnState::Idle,
            cancelled: false,
            typing_since: None,
            typing_for: None,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// How long the typing placeholder was on screen, once it has been
    /// removed. Measured on tokio's clock, so it is exact under a paused
    /// test clock.
    pub fn typing_duration(&self) -> Option<std::time::Duration> {
        self.typing_for
    }

    pub(crate) fn submit(&mut self) -> Result<(), TurnError> {
        self.advance(TurnEvent::Submit)
    }

    pub(crate) fn show_typing(&mut self) -> Result<(), TurnError> {
        self.advance(TurnEvent::ShowTyping)?;
        self.placeholder_shown = true;
        self.typing_since = Some(Instant::now());
        Ok(())
    }

    pub(crate) fn resolve(&mut self, reply: String) -> Result<(), TurnError> {
        self.advance(TurnEvent::Resolve)?;
        self.hide_typing();
        self.resolved_reply = Some(reply);
        Ok(())
    }

    pub(crate) fn finish(&mut self) -> Result<(), TurnError> {
        self.advance(TurnEvent::Finish)
    }

    pub(crate) fn cancel(&mut self) -> Result<(), TurnError> {
        self.advance(TurnEvent::Cancel)?;
        self.hide_typing();
        self.cancelled = true;
        Ok(())
    }

    fn advance(&mut self, event: TurnEvent) -> Result<(), TurnError> {
        let next = self.state.next(event)?;
        tracing::debug!(from = ?self.state, to = ?next, "turn transition");
        self.state = next;
        Ok(())
    }

    fn hide_typing(&mut self) {
        self.placeholder_shown = false;
        self.typing_for = self.typing_since.take().map(|since| since.elapsed());
    }
}
