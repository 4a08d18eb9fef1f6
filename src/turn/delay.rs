use async_trait::async_trait;
use std::time::Duration;

/// Suspends a reply task until it is time to show the reply.
///
/// The controller only ever awaits this on spawned tasks, so an
/// implementation must not block the thread.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Waits on tokio's timer. Under `tokio::time::pause` the wait completes
/// as soon as the runtime is idle, with the clock advanced accordingly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Ignores the duration and only yields once, so replies appear as soon as
/// the runtime gets to them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

/// How long the typing placeholder stays up: uniform in
/// `[min, min + spread)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    pub min: Duration,
    pub spread: Duration,
}

impl Default for TypingDelay {
    fn default() -> Self {
        TypingDelay { min: Duration::from_millis(400), spread: Duration::from_millis(200) }
    }
}

impl TypingDelay {
    /// Map `r` in `[0, 1)` onto the delay range, in whole milliseconds
    /// (the timer's resolution). The offset is capped so the upper bound
    /// stays exclusive; a spread under 1ms always yields `min`.
    pub fn sample(&self, r: f64) -> Duration {
        let spread = u64::try_from(self.spread.as_millis()).unwrap_or(u64::MAX);
        if spread == 0 {
            return self.min;
        }
        let offset = ((spread as f64 * r.clamp(0.0, 1.0)) as u64).min(spread - 1);
        self.min + Duration::from_millis(offset)
    }
}
