//! Regular timestamp sequences and distinct calendar days.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Generates timestamps from `start` in increments of `step`.
///
/// Timestamps strictly before `end` are always produced; `end` itself is
/// included only when `include_end` is set and the sequence lands on it
/// exactly. A non-positive `step` yields just `start` (or nothing when
/// `start >= end`).
///
/// # Example
///
/// ```ignore
/// let start = NaiveDate::from_ymd_opt(2000, 1, 1)?.and_hms_opt(0, 0, 0)?;
/// let end = start + TimeDelta::hours(9);
/// let steps = step_sequence(start, end, TimeDelta::hours(3), true);
/// assert_eq!(steps.len(), 4); // 00, 03, 06, 09
/// ```
pub fn step_sequence(
    start: NaiveDateTime,
    end: NaiveDateTime,
    step: TimeDelta,
    include_end: bool,
) -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    if step <= TimeDelta::zero() {
        if start < end || (include_end && start == end) {
            out.push(start);
        }
        return out;
    }
    let mut current = start;
    while current < end {
        out.push(current);
        current += step;
    }
    if include_end && current == end {
        out.push(current);
    }
    out
}

/// Returns the distinct calendar days of `times`, in first-seen order.
pub fn unique_days(times: &[NaiveDateTime]) -> Vec<NaiveDate> {
    let mut seen = HashSet::new();
    times
        .iter()
        .map(|t| t.date())
        .filter(|d| seen.insert(*d))
        .collect()
}
