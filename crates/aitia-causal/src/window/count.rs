use super::WindowedCases;
use crate::index::Timeline;

/// Number of windows in which the effect occurs for one of the window's cases.
///
/// Each window counts at most once, however many effect occurrences it holds.
pub fn count_effect(e_true: &Timeline, windows: &[WindowedCases]) -> usize {
    windows
        .iter()
        .filter(|w| effect_observed_in(e_true, w))
        .count()
}

fn effect_observed_in(e_true: &Timeline, window: &WindowedCases) -> bool {
    if window.cases.is_empty() {
        return false;
    }
    e_true
        .between(window.interval.start, window.interval.end)
        .any(|(_, e_cases)| e_cases.iter().any(|case| window.cases.contains(case)))
}
