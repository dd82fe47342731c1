//! AND / NOT window construction between two timelines.

use aitia_core::{CaseId, OverlapRule, Window};

use super::overlap::{only_x, overlap_with};
use super::WindowedCases;
use crate::index::{CaseList, Timeline};

/// Timestamps of `x_true` whose window can overlap one anchored at `t`.
///
/// Both windows have width `range`, so `t - range <= cand <= t + range` is
/// exactly the set of candidates that can touch.
pub fn candidates_near(
    x_true: &Timeline,
    t: f64,
    range: f64,
) -> impl Iterator<Item = (f64, &[CaseId])> + '_ {
    x_true.between(t - range, t + range)
}

/// Cases of `c_cases` also present in `x_cases`, keeping `c_cases` order
/// and duplicates.
fn shared_cases(c_cases: &[CaseId], x_cases: &[CaseId]) -> CaseList {
    c_cases
        .iter()
        .copied()
        .filter(|case| x_cases.contains(case))
        .collect()
}

/// Intervals where both `c` and `x` hold for at least one shared case.
///
/// For every cause timestamp `t` and every nearby `x` timestamp `cand`, emits
/// the overlap of `[t+r, t+s]` and `[cand+r, cand+s]` paired with the cases
/// observed under both labels at those instants.
pub fn and_windows(
    c_true: &Timeline,
    x_true: &Timeline,
    window: Window,
    rule: OverlapRule,
) -> Vec<WindowedCases> {
    let range = window.width();
    let mut and_list = Vec::new();

    for (t, c_cases) in c_true.iter() {
        let window_c = window.anchored_at(t);
        for (cand, x_cases) in candidates_near(x_true, t, range) {
            let shared = shared_cases(c_cases, x_cases);
            if shared.is_empty() {
                continue;
            }
            let window_x = window.anchored_at(cand);
            if let Some(interval) = overlap_with(rule, window_c, window_x) {
                and_list.push(WindowedCases {
                    interval,
                    cases: shared,
                });
            }
        }
    }

    and_list
}

/// Intervals where `x` holds but `c` does not.
///
/// For each `(t, cand)` pair: when no case is shared, the whole `x` window
/// qualifies with an empty case set. Independently, the part of the `x`
/// window not covered by the `c` window is added with the shared cases.
pub fn not_windows(c_true: &Timeline, x_true: &Timeline, window: Window) -> Vec<WindowedCases> {
    let range = window.width();
    let mut not_list = Vec::new();

    for (t, c_cases) in c_true.iter() {
        let window_c = window.anchored_at(t);
        for (cand, x_cases) in candidates_near(x_true, t, range) {
            let shared = shared_cases(c_cases, x_cases);
            let window_x = window.anchored_at(cand);

            if shared.is_empty() {
                not_list.push(WindowedCases {
                    interval: window_x,
                    cases: CaseList::new(),
                });
            }

            if let Some(interval) = only_x(window_c, window_x) {
                not_list.push(WindowedCases {
                    interval,
                    cases: shared,
                });
            }
        }
    }

    not_list
}
