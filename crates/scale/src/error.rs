//! Error types for the pluvia-scale crate.

use chrono::NaiveDateTime;

/// Error type for all fallible operations in the pluvia-scale crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScaleError {
    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when there are no climatology segments to average.
    #[error("climatology has no seasonal segments")]
    EmptyClimatology,

    /// Returned when the target segment has no time steps.
    #[error("target season has no time steps")]
    EmptyTarget,

    /// Returned when the data does not cover the target year's wet season.
    #[error("data does not cover the {year} wet season {start} .. {end}")]
    IncompleteTarget {
        /// Target year.
        year: i32,
        /// Window start.
        start: NaiveDateTime,
        /// Window end (exclusive).
        end: NaiveDateTime,
    },

    /// Returned when a target cell total cannot be used as a denominator
    /// and the policy is [`DegeneratePolicy::Fail`](crate::DegeneratePolicy::Fail).
    #[error("degenerate target total {total} at cell ({row}, {col})")]
    DegenerateScale {
        /// Grid row.
        row: usize,
        /// Grid column.
        col: usize,
        /// Target wet-season total at the cell.
        total: f64,
    },

    /// Returned when grids disagree.
    #[error("grid mismatch in {field}: expected {expected:?}, got {got:?}")]
    GridMismatch {
        /// Name of the mismatched input.
        field: &'static str,
        /// Expected grid shape `(lat, lon)`.
        expected: (usize, usize),
        /// Actual grid shape.
        got: (usize, usize),
    },

    /// Time series error.
    #[error(transparent)]
    TimeSeries(#[from] pluvia_timeseries::TimeSeriesError),
}
