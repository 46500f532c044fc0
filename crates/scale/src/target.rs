//! The target year's wet season.

use pluvia_seasons::{SeasonBoundary, SeasonWindow};
use pluvia_timeseries::TimeSeries;

use crate::error::ScaleError;

/// Returns the wet window of `year` and the steps of `precip` inside it.
///
/// The data must reach from the window start to its (exclusive) end, the
/// same coverage rule used to pick climatology years.
///
/// # Errors
///
/// Returns [`ScaleError::IncompleteTarget`] if `precip` does not cover the
/// whole window.
pub fn target_season(
    precip: &TimeSeries,
    boundary: &SeasonBoundary,
    year: i32,
) -> Result<(SeasonWindow, TimeSeries), ScaleError> {
    let window = boundary.wet_window(year);
    let covered = match (precip.first_time(), precip.last_time()) {
        (Some(first), Some(last)) => first <= window.start() && last >= window.end(),
        _ => false,
    };
    if !covered {
        return Err(ScaleError::IncompleteTarget {
            year,
            start: window.start(),
            end: window.end(),
        });
    }
    let target = precip.between(window.start(), window.end());
    Ok((window, target))
}
