//! Error types for the pluvia-seasons crate.

use pluvia_calendar::YearMarker;

/// Error type for all fallible operations in the pluvia-seasons crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeasonError {
    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when too few years remain after dropping the incomplete
    /// first and last years.
    #[error("insufficient years for season detection: got {n}, need at least {min}")]
    InsufficientYears {
        /// Number of years in the window-mean matrix.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when no window median lies below the threshold.
    #[error("no dry season found: no window median below threshold {threshold}")]
    NoSeasonFound {
        /// Dry threshold.
        threshold: f64,
    },

    /// Returned when the dry windows do not form a single contiguous run.
    #[error("dry windows {windows:?} do not form one contiguous run")]
    DisjointSeason {
        /// Indices of all windows below the threshold.
        windows: Vec<usize>,
    },

    /// Returned when the dry-season start does not precede its end within
    /// the calendar year.
    #[error("degenerate season: dry start {start} does not precede dry end {end}")]
    DegenerateSeason {
        /// Dry-season start marker.
        start: YearMarker,
        /// Dry-season end marker.
        end: YearMarker,
    },

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] pluvia_calendar::CalendarError),
}
