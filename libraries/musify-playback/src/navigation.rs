//! Index arithmetic for next/previous

use crate::shuffle::pick_random_excluding;
use crate::types::AdvancePolicy;
use rand::Rng;

/// `(i + 1) mod len`; index 0 when the current track is not in the list
pub fn sequential_next(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(
        current
            .filter(|index| *index < len)
            .map_or(0, |index| (index + 1) % len),
    )
}

/// `(i - 1 + len) mod len`; last index when the current track is not in the list
pub fn sequential_previous(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(
        current
            .filter(|index| *index < len)
            .map_or(len - 1, |index| (index + len - 1) % len),
    )
}

/// Index `next()` moves to under the given policy
pub fn advance_index<R: Rng + ?Sized>(
    policy: AdvancePolicy,
    rng: &mut R,
    current: Option<usize>,
    len: usize,
) -> Option<usize> {
    match policy {
        AdvancePolicy::Sequential => sequential_next(current, len),
        AdvancePolicy::Shuffle => pick_random_excluding(rng, len, current),
    }
}
