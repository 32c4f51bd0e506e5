/// The new length of a backing store that must hold at least `needed` elements.
///
/// Returns `None` when `current` already suffices. Otherwise the store grows to the larger of
/// `needed` and twice its current length, plus `margin`.
#[inline]
pub(crate) fn grown_len(
    current: usize,
    needed: usize,
    margin: usize,
    doubling: bool,
) -> Option<usize> {
    if needed <= current {
        return None;
    }
    let base = if doubling {
        needed.max(current.saturating_mul(2))
    } else {
        needed
    };
    Some(base + margin)
}
