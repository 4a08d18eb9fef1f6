//! Turn delivery.
//!
//! A *turn* is one user message and the bot reply that follows it. The
//! [`DialogueController`] drives each turn through a small state machine:
//!
//! ```text
//! Idle ──Submit──▶ UserMessagePosted ──ShowTyping──▶ TypingIndicatorShown
//!  ▲ ▲                                                 │            │
//!  │ │                                              Resolve       Cancel
//!  │ │                                                 v            │
//!  │ └───────────Finish──────────────────────── ReplyResolved       │
//!  └──────────────────────────Cancel────────────────────────────────┘
//! ```
//!
//! Posting the user message and the typing placeholder happens synchronously
//! in `submit`. The reply is chosen right away too; only its display waits
//! for a randomized delay, on a spawned task, so the caller is never blocked.
//!
//! ## Responsibilities by module
//!
//! - `state.rs`: [`TurnState`], [`TurnEvent`], [`ConversationTurn`] and
//!   [`TurnError`].
//! - `transcript.rs`: the [`Transcript`] seam and the in-memory
//!   [`MemoryTranscript`].
//! - `delay.rs`: the [`Delay`] seam and [`TypingDelay`] sampling.
//! - `controller.rs`: [`DialogueController`] and [`PendingTurn`].
//!
//! Overlapping turns are not serialized: each has its own placeholder and
//! replies appear in the order their delays expire.

#[path = "turn/controller.rs"]
mod controller;
#[path = "turn/delay.rs"]
mod delay;
#[path = "turn/state.rs"]
mod state;
#[path = "turn/transcript.rs"]
mod transcript;

pub use controller::{ControllerConfig, DialogueController, PendingTurn};
pub use delay::{Delay, NoDelay, TokioDelay, TypingDelay};
pub use state::{ConversationTurn, TurnError, TurnEvent, TurnState};
pub use transcript::{Author, Entry, EntryId, EntryKind, MemoryTranscript, Transcript};
