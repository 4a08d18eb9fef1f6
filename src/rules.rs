//! Built-in ScoreSight rule tables.
//!
//! The tables are plain static data, one module per tier. They are turned
//! into a [`RuleBook`](crate::RuleBook) by `RuleBook::builtin()` and compiled
//! into the matchers in `engine::tiers`. Order inside each table is
//! significant: the cascade takes the first entry that matches.

pub(crate) mod faq;
pub(crate) mod fallback;
pub(crate) mod greeting;
pub(crate) mod small_talk;

#[cfg(test)]
mod tests;

/// Containment rule inside the greeting tier ("good morning ...").
#[derive(Debug)]
pub(crate) struct StaticTimeOfDay {
    pub name: &'static str,
    pub phrases: &'static [&'static str],
    pub replies: &'static [&'static str],
}

#[derive(Debug)]
pub(crate) struct StaticSmallTalk {
    pub keyword: &'static str,
    pub replies: &'static [&'static str],
}

#[derive(Debug)]
pub(crate) struct StaticFaq {
    pub id: &'static str,
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}
