//! Reply classification engine.
//!
//! This module turns one normalized message into a [`Match`](crate::Match):
//! which tier answered, what triggered it, and which reply (pool or canonical
//! answer) to draw from.
//!
//! ## How the parts work together
//!
//! ```text
//! RuleBook ── Engine::compile ──────────────┐        (cascade.rs)
//!             - validate tables             │
//!             - compile anchored regexes    │
//!             - build tier matchers         │        (tiers.rs)
//!                                           v
//! NormalizedMessage ──▶ Engine::classify
//!                        greeting ─▶ small talk ─▶ faq ─▶ fallback
//!                        (first tier that matches wins)
//!                                           │
//!                                           v
//!                                  Match { tier, trigger, reply }
//!                                           │
//!                                 select (select.rs)
//!                                           v
//!                                        &str reply
//! ```
//!
//! The cascade is a fixed, ordered list of tier matchers evaluated in a loop.
//! Fallback is kept outside that list and returned when nothing else
//! matches, so every message gets exactly one outcome.
//!
//! ## Responsibilities by module
//!
//! - `tiers.rs`: the [`TierMatcher`] seam and one matcher per tier,
//!   parameterized by rule-book data.
//! - `cascade.rs`: [`Engine`], compilation and first-match-wins evaluation.
//! - `select.rs`: uniform selection from a response set.
//! - `trace.rs`: optional per-tier timing for verbose runs.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=scoresight_assistant=trace` to log every tier
//! evaluation.

#[path = "engine/cascade.rs"]
mod cascade;
#[path = "engine/select.rs"]
mod select;
#[path = "engine/tiers.rs"]
mod tiers;
#[path = "engine/trace.rs"]
mod trace;

pub use cascade::Engine;
pub(crate) use select::select;
