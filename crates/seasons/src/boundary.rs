//! Dry/wet season boundaries.

use chrono::NaiveDateTime;
use pluvia_calendar::YearMarker;

use crate::error::SeasonError;

/// The dry season of the climatology as two year-independent markers.
///
/// The dry season of year `Y` is `[dry_start(Y), dry_end(Y))`; the wet season
/// is its complement `[dry_end(Y), dry_start(Y + 1))`, labelled by the year
/// in which it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonBoundary {
    dry_start: YearMarker,
    dry_end: YearMarker,
}

impl SeasonBoundary {
    /// Creates a boundary.
    ///
    /// # Errors
    ///
    /// Returns [`SeasonError::DegenerateSeason`] unless `dry_start < dry_end`.
    pub fn new(dry_start: YearMarker, dry_end: YearMarker) -> Result<Self, SeasonError> {
        if dry_start >= dry_end {
            return Err(SeasonError::DegenerateSeason {
                start: dry_start,
                end: dry_end,
            });
        }
        Ok(Self { dry_start, dry_end })
    }

    /// Returns the dry-season start marker.
    pub fn dry_start(&self) -> YearMarker {
        self.dry_start
    }

    /// Returns the dry-season end marker.
    pub fn dry_end(&self) -> YearMarker {
        self.dry_end
    }

    /// Returns the dry season of `year`.
    pub fn dry_window(&self, year: i32) -> SeasonWindow {
        SeasonWindow {
            start: self.dry_start.in_year(year),
            end: self.dry_end.in_year(year),
        }
    }

    /// Returns the wet season starting in `year`.
    pub fn wet_window(&self, year: i32) -> SeasonWindow {
        SeasonWindow {
            start: self.dry_end.in_year(year),
            end: self.dry_start.in_year(year + 1),
        }
    }
}

/// A half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl SeasonWindow {
    /// Returns the inclusive start.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the exclusive end.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns `true` if `t` lies in `[start, end)`.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn boundary() -> SeasonBoundary {
        SeasonBoundary::new(
            YearMarker::new(5, 30, 0).unwrap(),
            YearMarker::new(10, 27, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn wet_follows_dry() {
        let b = boundary();
        for year in [2000, 2001, 2023] {
            assert_eq!(b.wet_window(year).start(), b.dry_window(year).end());
            assert_eq!(b.wet_window(year).end(), b.dry_window(year + 1).start());
        }
        assert_eq!(b.wet_window(2023).start(), at(2023, 10, 27));
        assert_eq!(b.wet_window(2023).end(), at(2024, 5, 30));
    }

    #[test]
    fn window_is_half_open() {
        let w = boundary().dry_window(2001);
        assert!(w.contains(at(2001, 5, 30)));
        assert!(w.contains(at(2001, 10, 26)));
        assert!(!w.contains(at(2001, 10, 27)));
    }

    #[test]
    fn degenerate_rejected() {
        let m = YearMarker::new(6, 1, 0).unwrap();
        assert_eq!(
            SeasonBoundary::new(m, m).unwrap_err(),
            SeasonError::DegenerateSeason { start: m, end: m }
        );
    }
}
