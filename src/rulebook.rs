//! Rule tables as data.
//!
//! A [`RuleBook`] holds the four tier tables in a serializable form. The
//! built-in ScoreSight tables come from `src/rules/**`; alternative tables
//! can be loaded from JSON. Loading validates everything the engine relies
//! on, so a broken table is rejected at startup instead of producing odd
//! replies later:
//!
//! - no empty response sets (enforced by [`ResponseSet`] construction,
//!   including deserialization);
//! - every greeting pattern compiles;
//! - every keyword/phrase is non-empty and already normalized (lowercase,
//!   trimmed), since it is compared against a [`NormalizedMessage`];
//! - FAQ topic ids are unique.
//!
//! [`NormalizedMessage`]: crate::NormalizedMessage

use crate::rules;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error raised while loading or compiling a [`RuleBook`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{context}: response set is empty")]
    EmptyResponseSet { context: String },

    #[error("invalid greeting pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{context} has an empty trigger")]
    EmptyTrigger { context: String },

    #[error("trigger {trigger:?} in {context} is not lowercase and trimmed; it can never match")]
    TriggerNotNormalized { context: String, trigger: String },

    #[error("duplicate FAQ topic id {0:?}")]
    DuplicateTopic(String),

    #[error("failed to read rule book {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule book: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A non-empty pool of interchangeable replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ResponseSet(Vec<String>);

impl ResponseSet {
    pub fn new<I, S>(replies: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies: Vec<String> = replies.into_iter().map(Into::into).collect();
        if replies.is_empty() {
            return Err(ConfigError::EmptyResponseSet { context: "reply list".to_string() });
        }
        Ok(ResponseSet(replies))
    }

    /// Built-in tables are non-empty by construction (see `src/macros.rs`).
    fn from_static(replies: &'static [&'static str]) -> Self {
        ResponseSet(replies.iter().map(|r| r.to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: an empty set cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, reply: &str) -> bool {
        self.0.iter().any(|r| r == reply)
    }
}

impl TryFrom<Vec<String>> for ResponseSet {
    type Error = ConfigError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        ResponseSet::new(value)
    }
}

impl From<ResponseSet> for Vec<String> {
    fn from(value: ResponseSet) -> Self {
        value.0
    }
}

/// A single fixed answer (one per FAQ topic).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalAnswer(String);

impl CanonicalAnswer {
    pub fn new(answer: impl Into<String>) -> Self {
        CanonicalAnswer(answer.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Containment sub-rule of the greeting tier, checked after the anchored
/// patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDayRule {
    pub name: String,
    pub phrases: Vec<String>,
    pub responses: ResponseSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingRule {
    /// Whole-message regular expressions, compiled case-insensitively.
    pub patterns: Vec<String>,
    pub responses: ResponseSet,
    #[serde(default)]
    pub time_of_day: Vec<TimeOfDayRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmallTalkRule {
    pub keyword: String,
    pub responses: ResponseSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqTopic {
    pub id: String,
    pub keywords: Vec<String>,
    pub answer: CanonicalAnswer,
}

/// The complete set of reply tables, one field per tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    pub greeting: GreetingRule,
    #[serde(default)]
    pub small_talk: Vec<SmallTalkRule>,
    #[serde(default)]
    pub faq: Vec<FaqTopic>,
    pub fallback: ResponseSet,
}

impl RuleBook {
    /// The ScoreSight assistant's built-in tables.
    pub fn builtin() -> Self {
        RuleBook {
            greeting: GreetingRule {
                patterns: rules::greeting::PATTERNS.iter().map(|p| p.to_string()).collect(),
                responses: ResponseSet::from_static(rules::greeting::REPLIES),
                time_of_day: rules::greeting::TIME_OF_DAY
                    .iter()
                    .map(|t| TimeOfDayRule {
                        name: t.name.to_string(),
                        phrases: t.phrases.iter().map(|p| p.to_string()).collect(),
                        responses: ResponseSet::from_static(t.replies),
                    })
                    .collect(),
            },
            small_talk: rules::small_talk::RULES
                .iter()
                .map(|r| SmallTalkRule {
                    keyword: r.keyword.to_string(),
                    responses: ResponseSet::from_static(r.replies),
                })
                .collect(),
            faq: rules::faq::TOPICS
                .iter()
                .map(|t| FaqTopic {
                    id: t.id.to_string(),
                    keywords: t.keywords.iter().map(|k| k.to_string()).collect(),
                    answer: CanonicalAnswer::new(t.answer),
                })
                .collect(),
            fallback: ResponseSet::from_static(rules::fallback::REPLIES),
        }
    }

    /// Parse and validate a rule book from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let book: RuleBook = serde_json::from_str(json)?;
        book.validate()?;
        Ok(book)
    }

    /// Read, parse and validate a rule book from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let book = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            small_talk = book.small_talk.len(),
            faq = book.faq.len(),
            "loaded rule book"
        );
        Ok(book)
    }

    /// Check the structural requirements listed in the module docs.
    ///
    /// Pattern compilation is checked separately by `Engine::compile`, which
    /// has to build the regexes anyway.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rule in &self.greeting.time_of_day {
            let context = format!("greeting time-of-day rule {:?}", rule.name);
            if rule.phrases.is_empty() {
                return Err(ConfigError::EmptyTrigger { context });
            }
            for phrase in &rule.phrases {
                check_trigger(phrase, &context)?;
            }
        }

        for rule in &self.small_talk {
            let context = format!("small-talk keyword {:?}", rule.keyword);
            check_trigger(&rule.keyword, &context)?;
        }

        let mut seen = HashSet::new();
        for topic in &self.faq {
            let context = format!("FAQ topic {:?}", topic.id);
            if !seen.insert(topic.id.as_str()) {
                return Err(ConfigError::DuplicateTopic(topic.id.clone()));
            }
            if topic.keywords.is_empty() {
                return Err(ConfigError::EmptyTrigger { context });
            }
            for keyword in &topic.keywords {
                check_trigger(keyword, &context)?;
            }
        }

        Ok(())
    }
}

fn check_trigger(trigger: &str, context: &str) -> Result<(), ConfigError> {
    if trigger.trim().is_empty() {
        return Err(ConfigError::EmptyTrigger { context: context.to_string() });
    }
    if trigger.trim() != trigger || trigger.to_lowercase() != trigger {
        return Err(ConfigError::TriggerNotNormalized { context: context.to_string(), trigger: trigger.to_string() });
    }
    Ok(())
}
