//! Pairwise interval rules.

use aitia_core::{Interval, OverlapRule};

/// Overlap of two closed intervals under the reference rule.
///
/// The pair is ordered by start; if the first ends before the second starts
/// there is no overlap, otherwise the result is `(second.start, first.end)`.
/// For equal-width intervals this equals the set intersection. When the
/// first interval contains the second, `first.end` overshoots `second.end`.
pub fn overlap(a: Interval, b: Interval) -> Option<Interval> {
    let (first, second) = if b.start < a.start { (b, a) } else { (a, b) };
    if first.end < second.start {
        return None;
    }
    Some(Interval::new(second.start, first.end))
}

/// Set intersection `[max(starts), min(ends)]`, `None` when disjoint.
pub fn strict_overlap(a: Interval, b: Interval) -> Option<Interval> {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    (start <= end).then(|| Interval::new(start, end))
}

pub fn overlap_with(rule: OverlapRule, a: Interval, b: Interval) -> Option<Interval> {
    match rule {
        OverlapRule::Reference => overlap(a, b),
        OverlapRule::StrictIntersection => strict_overlap(a, b),
    }
}

/// The part of `window_x` during which `window_c` does not hold.
///
/// If `c` starts first, the tail of `x` after `c` ends; if `x` starts first,
/// the head of `x` before `c` begins; if both start together, nothing.
pub fn only_x(window_c: Interval, window_x: Interval) -> Option<Interval> {
    if window_c.start < window_x.start {
        Some(Interval::new(window_c.end, window_x.end))
    } else if window_x.start < window_c.start {
        Some(Interval::new(window_x.start, window_c.start))
    } else {
        None
    }
}
