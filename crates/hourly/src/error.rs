//! Error types for the pluvia-hourly crate.

use chrono::{NaiveDate, NaiveDateTime};
use pluvia_timeseries::Variable;

/// Error type for all fallible operations in the pluvia-hourly crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HourlyError {
    /// Returned when there are no source samples to interpolate from.
    #[error("no source samples to interpolate")]
    EmptyInput,

    /// Returned when array lengths don't match.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when source offsets are not strictly increasing.
    #[error("source offsets not strictly increasing at index {index}")]
    NonMonotonicOffsets {
        /// Index of the offending offset.
        index: usize,
    },

    /// Returned when a target lies outside the span of the source offsets.
    #[error("target {target} outside source span [{min}, {max}]")]
    OutOfRange {
        /// Offending target.
        target: f64,
        /// First source offset.
        min: f64,
        /// Last source offset.
        max: f64,
    },

    /// Returned when the precipitation accumulation interval is not positive.
    #[error("accumulation interval must be positive, got {interval} hours")]
    InvalidInterval {
        /// Offending interval in hours.
        interval: i64,
    },

    /// Returned when a forcing series does not start at midnight.
    #[error("{variable} series starts at {time}, expected 00:00")]
    MisalignedStart {
        /// Variable of the misaligned series.
        variable: Variable,
        /// First timestamp of the series.
        time: NaiveDateTime,
    },

    /// Returned when forcing grids disagree.
    #[error("{variable} grid {got:?} differs from precipitation grid {expected:?}")]
    GridMismatch {
        /// Variable with the mismatched grid.
        variable: Variable,
        /// Precipitation grid shape.
        expected: (usize, usize),
        /// Grid shape of `variable`.
        got: (usize, usize),
    },

    /// Returned when an experiment period is empty or reversed.
    #[error("invalid experiment period: {start} .. {end}")]
    InvalidPeriod {
        /// First day.
        start: NaiveDate,
        /// End day (exclusive).
        end: NaiveDate,
    },
}
