//! Random track selection for shuffle advance

use rand::Rng;

/// Pick a uniformly random index in `0..len`, never returning `exclude`.
///
/// - `len == 0` gives `None`
/// - a singleton list gives its only index, even when excluded
/// - an out-of-range `exclude` is ignored
pub fn pick_random_excluding<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    exclude: Option<usize>,
) -> Option<usize> {
    match (len, exclude.filter(|index| *index < len)) {
        (0, _) => None,
        (1, _) => Some(0),
        (_, None) => Some(rng.gen_range(0..len)),
        (_, Some(excluded)) => {
            // Draw from len - 1 slots and skip over the excluded one
            let pick = rng.gen_range(0..len - 1);
            Some(if pick >= excluded { pick + 1 } else { pick })
        }
    }
}
