//! Classification metrics.
//!
//! Collected only by `Engine::classify_with_metrics`; the plain
//! `Engine::classify` path does not allocate them. The public API turns
//! these into [`TierTrace`](crate::TierTrace)s.

use crate::Tier;
use std::time::Duration;

/// One tier evaluation.
#[derive(Debug, Clone)]
pub(crate) struct TierPass {
    pub tier: Tier,
    /// What fired, if this tier matched.
    pub trigger: Option<String>,
    pub duration: Duration,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ClassifyMetrics {
    pub total: Duration,
    /// Tiers in the order they were evaluated; the last one matched.
    pub passes: Vec<TierPass>,
}
