use chrono::{Datelike, NaiveDate, TimeDelta};
use pluvia_calendar::{
    CalendarError, DAYS_PER_YEAR, REFERENCE_YEAR, YearMarker, is_leap_day, step_sequence,
};

#[test]
fn reference_year_has_no_leap_day() {
    let feb28 = NaiveDate::from_ymd_opt(REFERENCE_YEAR, 2, 28)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert!(!is_leap_day(feb28 + TimeDelta::days(1)));
}

#[test]
fn marker_roundtrip_every_reference_day() {
    let start = NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let end = NaiveDate::from_ymd_opt(REFERENCE_YEAR + 1, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let days = step_sequence(start, end, TimeDelta::days(1), false);
    assert_eq!(days.len(), DAYS_PER_YEAR as usize);

    for (i, t) in days.iter().enumerate() {
        let marker = YearMarker::from_datetime(*t).unwrap();
        assert_eq!(marker.day_of_year() as usize, i + 1, "doy mismatch at {t}");
        assert_eq!(marker.in_year(REFERENCE_YEAR), *t);
    }
}

#[test]
fn marker_in_leap_year_keeps_month_and_day() {
    let marker = YearMarker::new(3, 1, 0).unwrap();
    let t = marker.in_year(2024);
    assert_eq!((t.month(), t.day()), (3, 1));
    assert_eq!(t.ordinal(), 61);
}

#[test]
fn leap_day_of_real_series_cannot_become_marker() {
    let t = NaiveDate::from_ymd_opt(2020, 2, 29)
        .unwrap()
        .and_hms_opt(6, 0, 0)
        .unwrap();
    assert!(is_leap_day(t));
    assert!(matches!(
        YearMarker::from_datetime(t),
        Err(CalendarError::InvalidDay { day: 29, month: 2, .. })
    ));
}
