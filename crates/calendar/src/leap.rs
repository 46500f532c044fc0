//! Leap-day predicate.

use chrono::{Datelike, NaiveDateTime};

/// Returns `true` if `t` falls on February 29.
pub fn is_leap_day(t: NaiveDateTime) -> bool {
    t.month() == 2 && t.day() == 29
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn leap_day_detection() {
        assert!(is_leap_day(at(2024, 2, 29, 21)));
        assert!(!is_leap_day(at(2024, 2, 28, 21)));
        assert!(!is_leap_day(at(2024, 3, 1, 0)));
    }
}
