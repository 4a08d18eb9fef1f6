//! Response selection.

use crate::{RandomSource, Reply};

/// Pick the reply text for a match.
///
/// A pool yields entry `floor(r * n)` for one draw `r` in `[0, 1)`; a
/// canonical answer is returned as is and consumes no randomness.
pub(crate) fn select<'a>(reply: Reply<'a>, rng: &mut dyn RandomSource) -> &'a str {
    match reply {
        Reply::Canonical(answer) => answer.as_str(),
        Reply::Pool(set) => {
            let index = index_for(rng.next_unit(), set.len());
            // `index < len` and `len > 0`, so the lookup always succeeds.
            set.get(index).unwrap_or_default()
        }
    }
}

/// Map `r` in `[0, 1)` onto `0..n`. The `min` guards against a source that
/// hands out exactly 1.0.
fn index_for(r: f64, n: usize) -> usize {
    ((r * n as f64).floor() as usize).min(n.saturating_sub(1))
}
