use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use pluvia_calendar::step_sequence;
use pluvia_seasons::build_windows;

fn jan_first(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Every day of the year falls in exactly one window, for every length.
#[test]
fn windows_partition_the_year_for_every_length() {
    for year in [1901, 2000, 2023] {
        let days = step_sequence(
            jan_first(year),
            jan_first(year + 1),
            TimeDelta::days(1),
            false,
        );
        for l in 1..=365u16 {
            let windows = build_windows(l).unwrap();
            assert_eq!(windows.len(), usize::from(365 / l), "count for L={l}");
            assert!(windows.last().unwrap().is_open());
            assert!(windows[..windows.len() - 1].iter().all(|w| !w.is_open()));

            // Contiguous: each window ends where the next starts.
            for pair in windows.windows(2) {
                assert_eq!(pair[0].bounds(year).1, pair[1].bounds(year).0);
            }
            assert_eq!(windows[0].bounds(year).0, jan_first(year));
            assert_eq!(windows.last().unwrap().bounds(year).1, jan_first(year + 1));

            for day in &days {
                let hits = windows
                    .iter()
                    .filter(|w| {
                        let (s, e) = w.bounds(year);
                        s <= *day && *day < e
                    })
                    .count();
                assert_eq!(hits, 1, "L={l} day {day}");
            }
        }
    }
}

#[test]
fn non_remainder_windows_have_exact_length_in_common_years() {
    for l in [1u16, 7, 10, 30, 73, 100, 182] {
        let windows = build_windows(l).unwrap();
        for w in &windows[..windows.len() - 1] {
            let (s, e) = w.bounds(2023);
            assert_eq!((e - s).num_days(), i64::from(l));
        }
        let (s, e) = windows.last().unwrap().bounds(2023);
        assert_eq!((e - s).num_days(), i64::from(l + 365 % l));
        assert_eq!(e.year(), 2024);
    }
}
