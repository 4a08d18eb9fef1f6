//! Tier matchers.
//!
//! Each tier of the cascade is a [`TierMatcher`] built from rule-book data.
//! Matchers are pure: they look at a [`NormalizedMessage`] and either report
//! what fired and which reply to use, or pass.
//!
//! | tier       | match primitive                         | reply          |
//! |------------|-----------------------------------------|----------------|
//! | greeting   | anchored regex, then containment        | response set   |
//! | small talk | containment, first keyword in order     | response set   |
//! | faq        | containment, first topic in order       | canonical text |
//! | fallback   | always                                  | response set   |

use crate::rulebook::{ConfigError, FaqTopic, GreetingRule, ResponseSet, SmallTalkRule, TimeOfDayRule};
use crate::{Match, NormalizedMessage, Reply, Tier};
use regex::{Regex, RegexBuilder};
use std::fmt;

/// One conditional step of the cascade.
pub(crate) trait TierMatcher: fmt::Debug + Send + Sync {
    fn tier(&self) -> Tier;

    /// Return the match for `message`, or `None` to let the next tier try.
    fn find<'a>(&'a self, message: &NormalizedMessage) -> Option<Match<'a>>;
}

// --- Greeting ----------------------------------------------------------------

#[derive(Debug)]
pub(crate) struct GreetingTier {
    patterns: Vec<Regex>,
    responses: ResponseSet,
    time_of_day: Vec<TimeOfDayRule>,
}

impl GreetingTier {
    pub const TRIGGER: &'static str = "greeting";

    /// Compile the greeting patterns. Each pattern is wrapped in `^(?:…)$`,
    /// so a configured pattern can never match part of a longer message.
    pub fn compile(rule: &GreetingRule) -> Result<Self, ConfigError> {
        let patterns = rule
            .patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(&format!("^(?:{pattern})$"))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ConfigError::InvalidPattern { pattern: pattern.clone(), source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GreetingTier { patterns, responses: rule.responses.clone(), time_of_day: rule.time_of_day.clone() })
    }
}

impl TierMatcher for GreetingTier {
    fn tier(&self) -> Tier {
        Tier::Greeting
    }

    fn find<'a>(&'a self, message: &NormalizedMessage) -> Option<Match<'a>> {
        if self.patterns.iter().any(|re| re.is_match(message.as_str())) {
            return Some(Match { tier: Tier::Greeting, trigger: Self::TRIGGER, reply: Reply::Pool(&self.responses) });
        }

        self.time_of_day.iter().find(|rule| rule.phrases.iter().any(|p| message.contains(p))).map(|rule| Match {
            tier: Tier::Greeting,
            trigger: rule.name.as_str(),
            reply: Reply::Pool(&rule.responses),
        })
    }
}

// --- Small talk --------------------------------------------------------------

#[derive(Debug)]
pub(crate) struct SmallTalkTier {
    rules: Vec<SmallTalkRule>,
}

impl SmallTalkTier {
    pub fn new(rules: &[SmallTalkRule]) -> Self {
        SmallTalkTier { rules: rules.to_vec() }
    }
}

impl TierMatcher for SmallTalkTier {
    fn tier(&self) -> Tier {
        Tier::SmallTalk
    }

    fn find<'a>(&'a self, message: &NormalizedMessage) -> Option<Match<'a>> {
        self.rules.iter().find(|rule| message.contains(&rule.keyword)).map(|rule| Match {
            tier: Tier::SmallTalk,
            trigger: rule.keyword.as_str(),
            reply: Reply::Pool(&rule.responses),
        })
    }
}

// --- FAQ ---------------------------------------------------------------------

#[derive(Debug)]
pub(crate) struct FaqTier {
    topics: Vec<FaqTopic>,
}

impl FaqTier {
    pub fn new(topics: &[FaqTopic]) -> Self {
        FaqTier { topics: topics.to_vec() }
    }
}

impl TierMatcher for FaqTier {
    fn tier(&self) -> Tier {
        Tier::Faq
    }

    fn find<'a>(&'a self, message: &NormalizedMessage) -> Option<Match<'a>> {
        self.topics.iter().find(|topic| topic.keywords.iter().any(|k| message.contains(k))).map(|topic| Match {
            tier: Tier::Faq,
            trigger: topic.id.as_str(),
            reply: Reply::Canonical(&topic.answer),
        })
    }
}

// --- Fallback ----------------------------------------------------------------

/// The unconditional last step. It is not a `TierMatcher` because it cannot
/// pass.
#[derive(Debug)]
pub(crate) struct FallbackTier {
    responses: ResponseSet,
}

impl FallbackTier {
    pub const TRIGGER: &'static str = "fallback";

    pub fn new(responses: &ResponseSet) -> Self {
        FallbackTier { responses: responses.clone() }
    }

    pub fn answer(&self) -> Match<'_> {
        Match { tier: Tier::Fallback, trigger: Self::TRIGGER, reply: Reply::Pool(&self.responses) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleBook;

    fn msg(s: &str) -> NormalizedMessage {
        NormalizedMessage::new(s).unwrap()
    }

    #[test]
    fn greeting_patterns_are_anchored_even_when_configured_without_anchors() {
        let rule = GreetingRule {
            patterns: vec!["hi|hello".to_string()],
            responses: ResponseSet::new(["hey"]).unwrap(),
            time_of_day: vec![],
        };
        let tier = GreetingTier::compile(&rule).unwrap();

        assert!(tier.find(&msg("hi")).is_some());
        assert!(tier.find(&msg("HELLO")).is_some());
        assert!(tier.find(&msg("histogram")).is_none());
        assert!(tier.find(&msg("oh hello there")).is_none());
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let rule = GreetingRule {
            patterns: vec!["(unclosed".to_string()],
            responses: ResponseSet::new(["hey"]).unwrap(),
            time_of_day: vec![],
        };
        let err = GreetingTier::compile(&rule).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn time_of_day_rules_are_checked_after_patterns() {
        let tier = GreetingTier::compile(&RuleBook::builtin().greeting).unwrap();

        let exact = tier.find(&msg("good morning")).unwrap();
        assert_eq!(exact.trigger, GreetingTier::TRIGGER);

        let longer = tier.find(&msg("good morning everyone")).unwrap();
        assert_eq!(longer.trigger, "good morning");

        let night = tier.find(&msg("good night all")).unwrap();
        assert_eq!(night.trigger, "good evening");
    }

    #[test]
    fn small_talk_takes_first_keyword_in_table_order() {
        let book = RuleBook::builtin();
        let tier = SmallTalkTier::new(&book.small_talk);

        assert_eq!(tier.find(&msg("thanks a lot")).unwrap().trigger, "thank");
        assert_eq!(tier.find(&msg("ok bye")).unwrap().trigger, "bye");
        assert!(tier.find(&msg("predict arsenal")).is_none());
    }

    #[test]
    fn faq_returns_canonical_answer_of_first_topic() {
        let book = RuleBook::builtin();
        let tier = FaqTier::new(&book.faq);

        // "reliable" is listed under accuracy and trust; accuracy comes first.
        let m = tier.find(&msg("is it reliable")).unwrap();
        assert_eq!(m.trigger, "accuracy");
        assert!(matches!(m.reply, Reply::Canonical(a) if a == &book.faq[1].answer));
    }
}
