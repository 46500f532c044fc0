//! Error types for the pluvia-timeseries crate.

use chrono::NaiveDateTime;

/// Error type for all fallible operations in the pluvia-timeseries crate.
///
/// Every variant is a precondition violation: the run cannot continue with
/// the offending data. Variants carry the index and timestamp needed to
/// locate the problem in the source file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeSeriesError {
    /// Returned when the number of timestamps differs from the length of the
    /// array's time axis.
    #[error("shape mismatch: {times} timestamps but {steps} time steps in array")]
    ShapeMismatch {
        /// Number of timestamps.
        times: usize,
        /// Length of the array's first axis.
        steps: usize,
    },

    /// Returned when timestamps are not strictly increasing.
    #[error("timestamps not strictly increasing at index {index}: {current} follows {previous}")]
    NonMonotonic {
        /// Index of the offending timestamp.
        index: usize,
        /// Timestamp at `index - 1`.
        previous: NaiveDateTime,
        /// Timestamp at `index`.
        current: NaiveDateTime,
    },

    /// Returned when an invalid step sits at the first or last index, where
    /// no interpolation partner exists.
    #[error("invalid time step at series boundary (index {index}, {time}); cannot interpolate")]
    BoundaryGap {
        /// Index of the invalid step.
        index: usize,
        /// Timestamp of the invalid step.
        time: NaiveDateTime,
    },

    /// Returned when a spatial field does not match the series grid.
    #[error("grid mismatch: expected {expected:?}, got {got:?}")]
    GridMismatch {
        /// Grid shape of the series `(lat, lon)`.
        expected: (usize, usize),
        /// Grid shape of the other field.
        got: (usize, usize),
    },
}
