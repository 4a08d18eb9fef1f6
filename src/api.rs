use crate::engine::{self, Engine};
use crate::{Match, NormalizedMessage, RandomSource, RngSource, Tier};
use std::time::{Duration, Instant};

/// A selected reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The reply text, unescaped.
    pub text: String,
    /// Tier that produced the reply.
    pub tier: Tier,
    /// Greeting rule, small-talk keyword, FAQ topic id or `"fallback"`.
    pub trigger: String,
    /// Time spent normalizing, classifying and selecting.
    pub elapsed: Duration,
}

/// One tier evaluation in a verbose run.
#[derive(Debug, Clone)]
pub struct TierTrace {
    pub tier: Tier,
    pub matched: bool,
    pub trigger: Option<String>,
    pub duration: Duration,
}

/// Result of [`respond_verbose_with`].
///
/// Meant for debugging rule tables: it shows the normalized text and every
/// tier that was tried before one matched.
#[derive(Debug, Clone)]
pub struct ResponseDetails {
    pub input: String,
    pub normalized: String,
    pub response: Response,
    pub trace: Vec<TierTrace>,
    /// Time spent inside the cascade only.
    pub classify: Duration,
}

/// Classify `text` with the built-in tables, without selecting a reply.
///
/// Returns `None` for blank input.
///
/// # Example
/// ```
/// use scoresight_assistant::{Tier, classify};
///
/// assert_eq!(classify("how accurate is this").map(|m| m.tier), Some(Tier::Faq));
/// assert!(classify("   ").is_none());
/// ```
pub fn classify(text: &str) -> Option<Match<'static>> {
    let message = NormalizedMessage::new(text)?;
    Some(Engine::builtin().classify(&message))
}

/// Reply to `text` with the built-in tables and a thread-local generator.
///
/// Returns `None` for blank input; no reply is produced for it.
pub fn respond(text: &str) -> Option<Response> {
    respond_with(text, Engine::builtin(), &mut RngSource::new(rand::thread_rng()))
}

/// Reply to `text` using `engine` and the given random source.
///
/// Use a [`FixedRandom`](crate::FixedRandom) or
/// [`SequenceRandom`](crate::SequenceRandom) to make selection reproducible.
pub fn respond_with(text: &str, engine: &Engine, rng: &mut dyn RandomSource) -> Option<Response> {
    let start = Instant::now();
    let message = NormalizedMessage::new(text)?;
    let m = engine.classify(&message);
    let reply = engine::select(m.reply, rng);

    Some(Response { text: reply.to_string(), tier: m.tier, trigger: m.trigger.to_string(), elapsed: start.elapsed() })
}

/// Like [`respond_with`], with a per-tier trace.
pub fn respond_verbose_with(text: &str, engine: &Engine, rng: &mut dyn RandomSource) -> Option<ResponseDetails> {
    let start = Instant::now();
    let message = NormalizedMessage::new(text)?;
    let (m, metrics) = engine.classify_with_metrics(&message);
    let reply = engine::select(m.reply, rng);

    let trace = metrics
        .passes
        .into_iter()
        .map(|pass| TierTrace {
            tier: pass.tier,
            matched: pass.trigger.is_some(),
            trigger: pass.trigger,
            duration: pass.duration,
        })
        .collect();

    Some(ResponseDetails {
        input: text.to_string(),
        normalized: message.as_str().to_string(),
        response: Response {
            text: reply.to_string(),
            tier: m.tier,
            trigger: m.trigger.to_string(),
            elapsed: start.elapsed(),
        },
        trace,
        classify: metrics.total,
    })
}
