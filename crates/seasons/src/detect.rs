//! Dry-season detection from window-mean climatology.

use chrono::TimeDelta;
use pluvia_calendar::YearMarker;
use pluvia_stats::nanmedian;
use tracing::info;

use crate::aggregate::WindowMeans;
use crate::boundary::SeasonBoundary;
use crate::config::validate_window_days;
use crate::error::SeasonError;

/// Minimum number of years in the window-mean matrix: the first and last
/// years are dropped as incomplete and at least one must remain.
pub const MIN_YEARS: usize = 3;

/// Detects the dry season from the window-mean matrix.
///
/// The first and last years are dropped, the median of every window is taken
/// across the remaining years (NaN ignored), and the windows whose median
/// lies below `threshold` form the dry season. They must be one contiguous
/// run. The boundary extends half a window (integer days, from
/// [`WindowMeans::window_days`]) beyond the midpoints of the first and last
/// dry windows, read from the first retained year.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SeasonError::InvalidConfig`] | `means` was built without windows |
/// | [`SeasonError::InsufficientYears`] | fewer than [`MIN_YEARS`] rows |
/// | [`SeasonError::NoSeasonFound`] | no window median below `threshold` |
/// | [`SeasonError::DisjointSeason`] | dry windows not contiguous |
/// | [`SeasonError::Calendar`] | a boundary falls on February 29 |
/// | [`SeasonError::DegenerateSeason`] | boundary start not before end |
pub fn detect_dry_season(means: &WindowMeans, threshold: f64) -> Result<SeasonBoundary, SeasonError> {
    let window_days = means.window_days();
    validate_window_days(window_days)?;
    let n_years = means.years().len();
    if n_years < MIN_YEARS {
        return Err(SeasonError::InsufficientYears {
            n: n_years,
            min: MIN_YEARS,
        });
    }

    let retained = means.means().slice(ndarray::s![1..n_years - 1, ..]);
    let dry: Vec<usize> = retained
        .columns()
        .into_iter()
        .map(|col| nanmedian(col.iter()))
        .enumerate()
        .filter(|(_, median)| *median < threshold)
        .map(|(i, _)| i)
        .collect();

    let (Some(&first), Some(&last)) = (dry.first(), dry.last()) else {
        return Err(SeasonError::NoSeasonFound { threshold });
    };
    if last - first + 1 != dry.len() {
        return Err(SeasonError::DisjointSeason { windows: dry });
    }

    let half = TimeDelta::days(i64::from(window_days / 2));
    let mid = means.mid();
    let start = YearMarker::from_datetime(mid[[1, first]] - half)?;
    let end = YearMarker::from_datetime(mid[[1, last]] + half)?;
    let boundary = SeasonBoundary::new(start, end)?;

    info!(
        first_window = first,
        last_window = last,
        dry_start = %start,
        dry_end = %end,
        "detected dry season"
    );
    Ok(boundary)
}
