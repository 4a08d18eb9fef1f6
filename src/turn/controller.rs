use super::delay::{Delay, TokioDelay, TypingDelay};
use super::state::{ConversationTurn, TurnError};
use super::transcript::{Author, EntryId, EntryKind, Transcript};
use crate::engine::{self, Engine};
use crate::{NormalizedMessage, RandomSource, RngSource, Tier, escape_html};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Presentation settings for the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub typing: TypingDelay,
    /// Shown in the typing placeholder.
    pub assistant_name: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig { typing: TypingDelay::default(), assistant_name: "ScoreSight Assistant".to_string() }
    }
}

impl ControllerConfig {
    pub fn typing_text(&self) -> String {
        format!("{} is typing...", self.assistant_name)
    }
}

/// Drives turns against a caller-owned transcript.
///
/// `submit` must be called from within a tokio runtime: the reply of each
/// turn is delivered by a spawned task.
pub struct DialogueController<'e, T> {
    engine: &'e Engine,
    transcript: Arc<T>,
    delay: Arc<dyn Delay>,
    rng: Mutex<Box<dyn RandomSource + Send>>,
    config: ControllerConfig,
    /// Parent of every pending turn's token; replaced on `close`.
    shutdown: Mutex<CancellationToken>,
}

impl<'e, T: Transcript + 'static> DialogueController<'e, T> {
    /// A controller with tokio timing, an entropy-seeded generator and the
    /// default config.
    pub fn new(engine: &'e Engine, transcript: Arc<T>) -> Self {
        DialogueController {
            engine,
            transcript,
            delay: Arc::new(TokioDelay),
            rng: Mutex::new(Box::new(RngSource::from_entropy())),
            config: ControllerConfig::default(),
            shutdown: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn with_delay(mut self, delay: impl Delay + 'static) -> Self {
        self.delay = Arc::new(delay);
        self
    }

    pub fn with_random(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn transcript(&self) -> &Arc<T> {
        &self.transcript
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Start a turn for `raw`.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the user message
    /// and a typing placeholder are posted before this returns; the reply
    /// replaces the placeholder once the typing delay has passed.
    pub fn submit(&self, raw: &str) -> Option<PendingTurn> {
        let user_text = raw.trim();
        let message = NormalizedMessage::new(user_text)?;
        let mut turn = ConversationTurn::new(user_text);

        self.transcript.append(Author::User, EntryKind::Message, escape_html(user_text));
        self.transcript.scroll_to_bottom();
        step(turn.submit());

        let typing = escape_html(&self.config.typing_text());
        let placeholder = self.transcript.append(Author::Bot, EntryKind::Typing, typing);
        self.transcript.scroll_to_bottom();
        step(turn.show_typing());

        let m = self.engine.classify(&message);
        let (reply, delay) = {
            let mut rng = self.lock_rng();
            let reply = engine::select(m.reply, &mut **rng).to_string();
            (reply, self.config.typing.sample(rng.next_unit()))
        };
        tracing::debug!(tier = %m.tier, trigger = m.trigger, delay_ms = delay.as_millis() as u64, "reply scheduled");

        let cancel = self.shutdown.lock().unwrap_or_else(PoisonError::into_inner).child_token();
        let handle = tokio::spawn(deliver(
            turn,
            reply,
            delay,
            placeholder,
            Arc::clone(&self.transcript),
            Arc::clone(&self.delay),
            cancel.clone(),
        ));

        Some(PendingTurn { handle, cancel, placeholder, delay, tier: m.tier, trigger: m.trigger.to_string() })
    }

    /// Cancel every pending reply, e.g. because the chat window was closed.
    /// Their placeholders are removed and their replies never appear. Turns
    /// submitted afterwards are not affected.
    pub fn close(&self) {
        let mut shutdown = self.shutdown.lock().unwrap_or_else(PoisonError::into_inner);
        shutdown.cancel();
        *shutdown = CancellationToken::new();
        tracing::debug!("pending replies cancelled");
    }

    fn lock_rng(&self) -> MutexGuard<'_, Box<dyn RandomSource + Send>> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The reply half of a turn: wait, then swap the placeholder for the reply.
async fn deliver<T: Transcript>(
    mut turn: ConversationTurn,
    reply: String,
    delay: Duration,
    placeholder: EntryId,
    transcript: Arc<T>,
    timer: Arc<dyn Delay>,
    cancel: CancellationToken,
) -> ConversationTurn {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            transcript.remove(placeholder);
            step(turn.cancel());
            tracing::debug!(user_text = %turn.user_text, "reply cancelled before display");
        }
        _ = timer.wait(delay) => {
            transcript.remove(placeholder);
            transcript.append(Author::Bot, EntryKind::Message, escape_html(&reply));
            transcript.scroll_to_bottom();
            step(turn.resolve(reply));
            step(turn.finish());
        }
    }
    turn
}

/// The transitions above are issued in a fixed order, so a rejection means
/// the controller itself is broken.
fn step(result: Result<(), TurnError>) {
    if let Err(err) = result {
        tracing::error!(%err, "turn state machine rejected a transition");
        debug_assert!(false, "{err}");
    }
}

/// Handle to a turn whose reply has not necessarily been shown yet.
///
/// Dropping the handle does not cancel the turn.
#[derive(Debug)]
pub struct PendingTurn {
    handle: JoinHandle<ConversationTurn>,
    cancel: CancellationToken,
    placeholder: EntryId,
    delay: Duration,
    tier: Tier,
    trigger: String,
}

impl PendingTurn {
    /// Drop the reply if it has not been shown yet.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// The sampled typing delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn placeholder(&self) -> EntryId {
        self.placeholder
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Wait for the turn to complete (resolved or cancelled).
    pub async fn finish(self) -> Result<ConversationTurn, TurnError> {
        Ok(self.handle.await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::{MemoryTranscript, NoDelay, TurnState};
    use crate::{FixedRandom, SequenceRandom};
    use tokio::time::Instant;

    const TYPING: &str = "ScoreSight Assistant is typing...";

    fn controller(rng: impl RandomSource + Send + 'static) -> DialogueController<'static, MemoryTranscript> {
        DialogueController::new(Engine::builtin(), Arc::new(MemoryTranscript::new())).with_random(rng)
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_starts_no_turn() {
        let ctl = controller(FixedRandom::first());
        assert!(ctl.submit("").is_none());
        assert!(ctl.submit("   \t").is_none());
        assert!(ctl.transcript().entries().is_empty());
        assert_eq!(ctl.transcript().scroll_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn user_message_and_placeholder_are_posted_synchronously() {
        let ctl = controller(FixedRandom::first());
        let pending = ctl.submit("  hello  ").unwrap();

        let entries = ctl.transcript().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].author, entries[0].kind), (Author::User, EntryKind::Message));
        assert_eq!(entries[0].html.as_str(), "hello");
        assert_eq!((entries[1].author, entries[1].kind), (Author::Bot, EntryKind::Typing));
        assert_eq!(entries[1].html.as_str(), TYPING);
        assert_eq!(entries[1].id, pending.placeholder());
        assert_eq!(ctl.transcript().scroll_count(), 2);
        assert!(ctl.transcript().is_at_bottom());
        assert_eq!(pending.tier(), Tier::Greeting);
        assert!(!pending.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn reply_replaces_placeholder_after_delay() {
        let ctl = controller(FixedRandom::first());
        let pending = ctl.submit("how accurate is this").unwrap();
        assert_eq!(pending.delay(), Duration::from_millis(400));

        let turn = pending.finish().await.unwrap();
        assert_eq!(turn.state(), TurnState::Idle);
        assert!(!turn.placeholder_shown);
        assert_eq!(turn.user_text, "how accurate is this");

        let messages = ctl.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].0, Author::Bot);
        assert_eq!(Some(&messages[1].1), turn.resolved_reply.as_ref());
        assert!(messages[1].1.starts_with("Our current model achieves about 75% accuracy"));
        assert_eq!(ctl.transcript().typing_count(), 0);
        assert_eq!(ctl.transcript().scroll_count(), 3);
        assert!(ctl.transcript().is_at_bottom());
    }

    #[tokio::test(start_paused = true)]
    async fn placeholder_is_visible_between_400_and_600_ms() {
        let values: Vec<f64> = (0..20).map(|i| i as f64 / 20.0).chain([FixedRandom::LARGEST_BELOW_ONE]).collect();
        let ctl = controller(SequenceRandom::new(values));

        for i in 0..21 {
            let submitted = Instant::now();
            let pending = ctl.submit(&format!("message {i}")).unwrap();
            let turn = pending.finish().await.unwrap();

            let shown = turn.typing_duration().unwrap();
            assert_eq!(shown, submitted.elapsed());
            assert!(shown >= Duration::from_millis(400), "turn {i}: {shown:?}");
            assert!(shown < Duration::from_millis(600), "turn {i}: {shown:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn user_text_is_escaped_before_reaching_the_transcript() {
        let ctl = controller(FixedRandom::first());
        ctl.submit("<script>alert('x')</script>").unwrap().finish().await.unwrap();

        let entries = ctl.transcript().entries();
        assert_eq!(entries[0].html.as_str(), "&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;");
        assert!(!ctl.transcript().render_html().contains("<script>"));
        assert_eq!(ctl.transcript().messages()[0].1, "<script>alert('x')</script>");
    }

    #[tokio::test(start_paused = true)]
    async fn bot_reply_is_escaped_before_reaching_the_transcript() {
        let ctl = controller(FixedRandom::first());
        let before = chrono::Utc::now();
        let turn = ctl.submit("zzz").unwrap().finish().await.unwrap();
        assert!(turn.created_at >= before && turn.created_at <= chrono::Utc::now());

        let reply = turn.resolved_reply.as_deref().unwrap();
        assert!(reply.starts_with("Hmm… I'm not sure"));
        let entries = ctl.transcript().entries();
        let bot = entries.iter().find(|e| (e.author, e.kind) == (Author::Bot, EntryKind::Message)).unwrap();
        assert!(bot.html.as_str().contains("I&#039;m not sure"));
        assert!(!bot.html.as_str().contains('\''));
        assert_eq!(bot.html.to_text(), reply);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_turn_removes_placeholder_and_never_replies() {
        let ctl = controller(FixedRandom::first());
        let pending = ctl.submit("hello").unwrap();
        pending.cancel();

        let turn = pending.finish().await.unwrap();
        assert!(turn.is_cancelled());
        assert!(turn.resolved_reply.is_none());
        assert_eq!(ctl.transcript().typing_count(), 0);
        assert_eq!(ctl.transcript().messages(), vec![(Author::User, "hello".to_string())]);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(ctl.transcript().entries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn close_cancels_all_pending_turns_but_not_later_ones() {
        let ctl = controller(FixedRandom::first());
        let a = ctl.submit("hi").unwrap();
        let b = ctl.submit("thanks").unwrap();
        assert_eq!(ctl.transcript().typing_count(), 2);

        ctl.close();
        assert!(a.finish().await.unwrap().is_cancelled());
        assert!(b.finish().await.unwrap().is_cancelled());
        assert_eq!(ctl.transcript().typing_count(), 0);

        let c = ctl.submit("bye").unwrap().finish().await.unwrap();
        assert!(!c.is_cancelled());
        assert_eq!(ctl.transcript().messages().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_turns_complete_in_delay_order() {
        // Draws per turn: reply index, then delay.
        let ctl = controller(SequenceRandom::new([0.0, 0.9, 0.0, 0.1]));
        let slow = ctl.submit("hello").unwrap();
        let fast = ctl.submit("thanks").unwrap();
        assert_eq!(slow.delay(), Duration::from_millis(580));
        assert_eq!(fast.delay(), Duration::from_millis(420));
        assert!(slow.delay() > fast.delay());
        assert_eq!(ctl.transcript().typing_count(), 2);

        let fast_turn = fast.finish().await.unwrap();
        assert!(!slow.is_finished());
        // Only the fast turn's own placeholder is gone.
        assert_eq!(ctl.transcript().typing_count(), 1);
        assert!(ctl.transcript().entries().iter().any(|e| e.id == slow.placeholder()));

        let slow_turn = slow.finish().await.unwrap();
        let bot: Vec<String> =
            ctl.transcript().messages().into_iter().filter(|(a, _)| *a == Author::Bot).map(|(_, t)| t).collect();
        assert_eq!(bot, vec![fast_turn.resolved_reply.unwrap(), slow_turn.resolved_reply.unwrap()]);
    }

    #[tokio::test]
    async fn no_delay_resolves_immediately() {
        let ctl = controller(FixedRandom::first()).with_delay(NoDelay).with_config(ControllerConfig {
            assistant_name: "Bot".to_string(),
            ..ControllerConfig::default()
        });
        let pending = ctl.submit("yes").unwrap();
        assert_eq!(ctl.transcript().entries()[1].html.as_str(), "Bot is typing...");

        let turn = pending.finish().await.unwrap();
        assert_eq!(turn.resolved_reply.as_deref(), Some("Awesome! 🔥 What would you like to know?"));
    }
}
