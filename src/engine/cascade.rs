//! The ordered cascade.
//!
//! [`Engine`] owns the compiled tiers and evaluates them strictly in order;
//! the first tier that matches decides the outcome. The engine is immutable
//! after [`Engine::compile`] and is shared freely across turns and tasks.

use super::tiers::{FaqTier, FallbackTier, GreetingTier, SmallTalkTier, TierMatcher};
use super::trace::{ClassifyMetrics, TierPass};
use crate::rulebook::{ConfigError, RuleBook};
use crate::{Match, NormalizedMessage, Tier};
use once_cell::sync::Lazy;
use std::time::Instant;

static BUILTIN: Lazy<Engine> =
    Lazy::new(|| Engine::compile(&RuleBook::builtin()).expect("built-in rule book must compile"));

/// Compiled reply tables, ready to classify messages.
#[derive(Debug)]
pub struct Engine {
    /// Conditional tiers in evaluation order.
    tiers: Vec<Box<dyn TierMatcher>>,
    fallback: FallbackTier,
}

impl Engine {
    /// Validate `book` and compile it into tier matchers.
    pub fn compile(book: &RuleBook) -> Result<Self, ConfigError> {
        book.validate()?;

        let tiers: Vec<Box<dyn TierMatcher>> = vec![
            Box::new(GreetingTier::compile(&book.greeting)?),
            Box::new(SmallTalkTier::new(&book.small_talk)),
            Box::new(FaqTier::new(&book.faq)),
        ];
        debug_assert!(tiers.windows(2).all(|w| w[0].tier() < w[1].tier()), "tiers out of order");

        Ok(Engine { tiers, fallback: FallbackTier::new(&book.fallback) })
    }

    /// The engine for the built-in ScoreSight tables, compiled on first use.
    pub fn builtin() -> &'static Engine {
        &BUILTIN
    }

    /// Tiers in evaluation order, fallback included.
    pub fn tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        self.tiers.iter().map(|t| t.tier()).chain(std::iter::once(Tier::Fallback))
    }

    /// Run the cascade over `message`. Never fails: fallback catches
    /// everything the other tiers pass on.
    pub fn classify<'a>(&'a self, message: &NormalizedMessage) -> Match<'a> {
        let found = self.tiers.iter().find_map(|tier| {
            let found = tier.find(message);
            tracing::trace!(tier = %tier.tier(), matched = found.is_some(), "tier evaluated");
            found
        });
        let outcome = found.unwrap_or_else(|| self.fallback.answer());
        tracing::debug!(tier = %outcome.tier, trigger = outcome.trigger, "message classified");
        outcome
    }

    /// Same as [`classify`](Self::classify), but records every tier that was
    /// evaluated and how long it took.
    pub(crate) fn classify_with_metrics<'a>(&'a self, message: &NormalizedMessage) -> (Match<'a>, ClassifyMetrics) {
        let start = Instant::now();
        let mut passes = Vec::with_capacity(self.tiers.len() + 1);
        let mut outcome = None;

        for tier in &self.tiers {
            let t0 = Instant::now();
            let found = tier.find(message);
            passes.push(TierPass {
                tier: tier.tier(),
                trigger: found.map(|m| m.trigger.to_string()),
                duration: t0.elapsed(),
            });
            if found.is_some() {
                outcome = found;
                break;
            }
        }

        let outcome = outcome.unwrap_or_else(|| {
            let m = self.fallback.answer();
            passes.push(TierPass {
                tier: Tier::Fallback,
                trigger: Some(m.trigger.to_string()),
                duration: Default::default(),
            });
            m
        });

        tracing::debug!(tier = %outcome.tier, trigger = outcome.trigger, "message classified");
        (outcome, ClassifyMetrics { total: start.elapsed(), passes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Reply, ResponseSet};

    fn classify(engine: &Engine, raw: &str) -> (Tier, String) {
        let m = engine.classify(&NormalizedMessage::new(raw).unwrap());
        (m.tier, m.trigger.to_string())
    }

    #[test]
    fn builtin_engine_lists_tiers_in_rank_order() {
        let tiers: Vec<Tier> = Engine::builtin().tiers().collect();
        assert_eq!(tiers, Tier::ALL.to_vec());
        assert!(tiers.windows(2).all(|w| w[0].rank() < w[1].rank()));
    }

    #[test]
    fn earlier_tier_wins_when_several_match() {
        let engine = Engine::builtin();
        // "afternoon" contains the small-talk keyword "no".
        assert_eq!(classify(engine, "good afternoon"), (Tier::Greeting, "greeting".into()));
        // Greeting containment rule beats both "no" and the FAQ keyword "team".
        assert_eq!(classify(engine, "good afternoon team"), (Tier::Greeting, "good afternoon".into()));
        // Both small talk ("thank") and FAQ ("how accurate").
        assert_eq!(classify(engine, "thank you, how accurate is it"), (Tier::SmallTalk, "thank".into()));
        // "ok, what data do you use": small talk "ok" shadows FAQ "data".
        assert_eq!(classify(engine, "ok, what data do you use"), (Tier::SmallTalk, "ok".into()));
    }

    #[test]
    fn custom_book_without_optional_tiers_still_falls_back() {
        let book = RuleBook::from_json_str(
            r#"{ "greeting": { "patterns": ["^hi$"], "responses": ["hello"] }, "fallback": ["dunno"] }"#,
        )
        .unwrap();
        let engine = Engine::compile(&book).unwrap();

        assert_eq!(classify(&engine, "hi"), (Tier::Greeting, "greeting".into()));
        let m = engine.classify(&NormalizedMessage::new("how accurate").unwrap());
        assert_eq!(m.tier, Tier::Fallback);
        assert_eq!(m.reply, Reply::Pool(&ResponseSet::new(["dunno"]).unwrap()));
    }

    #[test]
    fn compile_rejects_bad_pattern() {
        let mut book = RuleBook::builtin();
        book.greeting.patterns.push("[a-".to_string());
        assert!(matches!(Engine::compile(&book), Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn metrics_record_each_evaluated_tier() {
        let engine = Engine::builtin();

        let (m, metrics) = engine.classify_with_metrics(&NormalizedMessage::new("what data do you use").unwrap());
        assert_eq!(m.tier, Tier::Faq);
        let tiers: Vec<Tier> = metrics.passes.iter().map(|p| p.tier).collect();
        assert_eq!(tiers, vec![Tier::Greeting, Tier::SmallTalk, Tier::Faq]);
        assert_eq!(metrics.passes[2].trigger.as_deref(), Some("data-used"));
        assert!(metrics.passes[..2].iter().all(|p| p.trigger.is_none()));

        let (m, metrics) = engine.classify_with_metrics(&NormalizedMessage::new("asdkjfh random text").unwrap());
        assert_eq!(m.tier, Tier::Fallback);
        assert_eq!(metrics.passes.len(), 4);
    }
}
