//! CF-convention time axes: `"<unit> since <epoch>"`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::IoError;

/// Calendars whose offsets map onto the proleptic Gregorian calendar.
const GREGORIAN_CALENDARS: [&str; 3] = ["standard", "gregorian", "proleptic_gregorian"];

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    pub fn seconds(self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3_600,
            TimeUnit::Days => 86_400,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        };
        f.write_str(s)
    }
}

impl FromStr for TimeUnit {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "min" | "mins" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            other => Err(IoError::InvalidTime {
                reason: format!("unknown unit '{other}'"),
            }),
        }
    }
}

/// A parsed `units` attribute of a time coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    unit: TimeUnit,
    epoch: NaiveDateTime,
}

impl TimeUnits {
    /// Creates units of `unit` counted from `epoch`.
    pub fn new(unit: TimeUnit, epoch: NaiveDateTime) -> Self {
        Self { unit, epoch }
    }

    /// Returns the offset unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns the reference time.
    pub fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }

    /// Converts raw offsets into timestamps, rounded to the nearest second.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidTime`] for non-finite offsets or timestamps
    /// outside chrono's range.
    pub fn decode(&self, offsets: &[f64]) -> Result<Vec<NaiveDateTime>, IoError> {
        let scale = self.unit.seconds() as f64;
        offsets
            .iter()
            .map(|&offset| {
                if !offset.is_finite() {
                    return Err(IoError::InvalidTime {
                        reason: format!("non-finite offset {offset}"),
                    });
                }
                let seconds = (offset * scale).round() as i64;
                TimeDelta::try_seconds(seconds)
                    .and_then(|delta| self.epoch.checked_add_signed(delta))
                    .ok_or_else(|| IoError::InvalidTime {
                        reason: format!("offset {offset} {} out of range", self.unit),
                    })
            })
            .collect()
    }

    /// Offset of `time` from the epoch in units, as a float.
    pub fn encode(&self, time: NaiveDateTime) -> f64 {
        (time - self.epoch).num_seconds() as f64 / self.unit.seconds() as f64
    }
}

impl fmt::Display for TimeUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} since {}", self.unit, self.epoch.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl FromStr for TimeUnits {
    type Err = IoError;

    /// Parses strings such as `"days since 1899-12-31"`,
    /// `"hours since 1979-01-01 00:00:00"` or
    /// `"seconds since 1970-01-01T00:00:00Z"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IoError::InvalidTime {
            reason: format!("unexpected time units format: '{s}'"),
        };
        let mut parts = s.split_whitespace();
        let unit: TimeUnit = parts.next().ok_or_else(invalid)?.parse()?;
        if !parts.next().is_some_and(|w| w.eq_ignore_ascii_case("since")) {
            return Err(invalid());
        }
        let date_part = parts.next().ok_or_else(invalid)?;
        let time_part = parts.next();

        let (date_str, inline_time) = match date_part.split_once('T') {
            Some((d, t)) => (d, Some(t)),
            None => (date_part, None),
        };
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            IoError::InvalidTime {
                reason: format!("failed to parse epoch date '{date_str}': {e}"),
            }
        })?;
        let time = match inline_time.or(time_part) {
            Some(t) => parse_clock(t.trim_end_matches('Z'))?,
            None => NaiveTime::default(),
        };
        Ok(TimeUnits::new(unit, date.and_time(time)))
    }
}

fn parse_clock(s: &str) -> Result<NaiveTime, IoError> {
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("failed to parse epoch time '{s}'"),
        })
}

/// Rejects calendars that do not follow the Gregorian leap-year rules.
///
/// A missing calendar attribute is treated as `standard`.
pub(crate) fn check_calendar(calendar: Option<&str>) -> Result<(), IoError> {
    match calendar {
        None => Ok(()),
        Some(c) if GREGORIAN_CALENDARS.contains(&c.to_ascii_lowercase().as_str()) => Ok(()),
        Some(c) => Err(IoError::InvalidTime {
            reason: format!("unsupported calendar '{c}'"),
        }),
    }
}
