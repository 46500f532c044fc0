//! Year-independent `(month, day, hour)` markers.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::CalendarError;

/// Number of days in each month of a non-leap year (index 0 unused).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day-of-year on which each month starts in a non-leap year (index 0 unused).
pub(crate) const MONTH_START_DOY: [u16; 13] =
    [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// A point in the year, independent of the year itself.
///
/// Markers are validated against the non-leap calendar, so February 29 can
/// never be represented and [`YearMarker::in_year`] is infallible for every
/// year. Ordering follows the calendar: month, then day, then hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMarker {
    month: u8,
    day: u8,
    hour: u8,
}

impl YearMarker {
    /// Creates a marker from month, day and hour.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12,
    /// [`CalendarError::InvalidDay`] if `day` is not valid for the month in a
    /// non-leap year, and [`CalendarError::InvalidHour`] if `hour > 23`.
    pub fn new(month: u8, day: u8, hour: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = DAYS_PER_MONTH[month as usize];
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        if hour > 23 {
            return Err(CalendarError::InvalidHour { hour });
        }
        Ok(Self { month, day, hour })
    }

    /// Creates a marker from the month, day and hour of `t`.
    ///
    /// Minutes and seconds are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDay`] if `t` falls on February 29.
    pub fn from_datetime(t: NaiveDateTime) -> Result<Self, CalendarError> {
        Self::new(t.month() as u8, t.day() as u8, t.hour() as u8)
    }

    /// Returns the timestamp of this marker in `year`.
    pub fn in_year(self, year: i32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, u32::from(self.month), u32::from(self.day))
            .and_then(|d| d.and_hms_opt(u32::from(self.hour), 0, 0))
            // Safety: month/day are validated against the non-leap calendar,
            // which is a subset of every Gregorian year.
            .expect("YearMarker always holds a date valid in every year")
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month.
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the hour of day (0..=23).
    pub fn hour(self) -> u8 {
        self.hour
    }

    /// Returns the day of year in the non-leap calendar (1..=365).
    pub fn day_of_year(self) -> u16 {
        MONTH_START_DOY[self.month as usize] + u16::from(self.day) - 1
    }
}

impl fmt::Display for YearMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02} {:02}:00", self.month, self.day, self.hour)
    }
}
