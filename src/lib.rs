#[macro_use]
mod macros;
mod api;
mod engine;
mod escape;
mod normalize;
mod random;
mod rulebook;
mod rules;
mod turn;

pub use api::{Response, ResponseDetails, TierTrace, classify, respond, respond_verbose_with, respond_with};
pub use engine::Engine;
pub use escape::{SafeHtml, escape_html};
pub use normalize::NormalizedMessage;
pub use random::{FixedRandom, RandomSource, RngSource, SequenceRandom};
pub use rulebook::{
    CanonicalAnswer, ConfigError, FaqTopic, GreetingRule, ResponseSet, RuleBook, SmallTalkRule, TimeOfDayRule,
};
pub use turn::{
    Author, ControllerConfig, ConversationTurn, Delay, DialogueController, Entry, EntryId, EntryKind,
    MemoryTranscript, NoDelay, PendingTurn, TokioDelay, Transcript, TurnError, TurnEvent, TurnState, TypingDelay,
};

// --- Core types --------------------------------------------------------------

/// One matching strategy of the reply cascade.
///
/// Tiers are evaluated in `rank()` order and the first one that matches
/// produces the reply. `Fallback` matches unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Greeting,
    SmallTalk,
    Faq,
    Fallback,
}

impl Tier {
    /// All tiers in evaluation order.
    pub const ALL: [Tier; 4] = [Tier::Greeting, Tier::SmallTalk, Tier::Faq, Tier::Fallback];

    /// Fixed priority rank (1 is evaluated first).
    pub fn rank(self) -> u8 {
        match self {
            Tier::Greeting => 1,
            Tier::SmallTalk => 2,
            Tier::Faq => 3,
            Tier::Fallback => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::Greeting => "greeting",
            Tier::SmallTalk => "small_talk",
            Tier::Faq => "faq",
            Tier::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a matched rule answers with: a pool of paraphrases to draw from, or
/// one fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply<'a> {
    Pool(&'a ResponseSet),
    Canonical(&'a CanonicalAnswer),
}

/// The outcome of running the cascade over one message.
///
/// `trigger` names what fired inside the tier: the greeting rule, the
/// small-talk keyword, the FAQ topic id, or `"fallback"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub tier: Tier,
    pub trigger: &'a str,
    pub reply: Reply<'a>,
}
