//! Error types for pluvia-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the pluvia-io crate.
///
/// This enum covers missing files, NetCDF library failures, unexpected
/// file layouts and time axes that cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a time value cannot be parsed or is out of range.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when a reader configuration is inconsistent.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// Human-readable explanation.
        reason: String,
    },

    /// Wraps a series construction failure from pluvia-timeseries.
    #[error("time series error: {reason}")]
    TimeSeries {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<pluvia_timeseries::TimeSeriesError> for IoError {
    fn from(e: pluvia_timeseries::TimeSeriesError) -> Self {
        IoError::TimeSeries {
            reason: e.to_string(),
        }
    }
}
