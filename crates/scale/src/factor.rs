//! Per-cell scale factors from climatological and target wet-season totals.

use ndarray::{Array2, Axis};
use pluvia_seasons::SeasonSegments;
use pluvia_timeseries::TimeSeries;
use tracing::{info, warn};

use crate::config::{DegeneratePolicy, ScaleConfig};
use crate::error::ScaleError;

/// Multiplicative factor per grid cell, with the totals it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleFactor {
    factor: Array2<f64>,
    climatology_total: Array2<f64>,
    target_total: Array2<f64>,
    degenerate: Vec<(usize, usize)>,
}

impl ScaleFactor {
    /// Returns the `[lat, lon]` factors.
    pub fn factor(&self) -> &Array2<f64> {
        &self.factor
    }

    /// Returns the climatological (multi-year mean) season totals.
    pub fn climatology_total(&self) -> &Array2<f64> {
        &self.climatology_total
    }

    /// Returns the target season totals.
    pub fn target_total(&self) -> &Array2<f64> {
        &self.target_total
    }

    /// Returns the cells left unscaled under [`DegeneratePolicy::Unscaled`].
    pub fn degenerate_cells(&self) -> &[(usize, usize)] {
        &self.degenerate
    }

    /// Returns the grid shape `(lat, lon)`.
    pub fn shape(&self) -> (usize, usize) {
        self.factor.dim()
    }
}

/// Computes `climatology total / target total` for every cell.
///
/// The climatological total of a cell is the mean over years of its season
/// totals. A target total whose magnitude is at most
/// `config.min_target_total()`, or any non-finite total, is degenerate and
/// handled according to `config.policy()`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ScaleError::EmptyClimatology`] | no segments |
/// | [`ScaleError::EmptyTarget`] | target has no time steps |
/// | [`ScaleError::GridMismatch`] | a segment grid differs from the target grid |
/// | [`ScaleError::DegenerateScale`] | degenerate cell under [`DegeneratePolicy::Fail`] |
pub fn compute_scale_factor(
    climatology: &SeasonSegments,
    target: &TimeSeries,
    config: &ScaleConfig,
) -> Result<ScaleFactor, ScaleError> {
    config.validate()?;
    if climatology.is_empty() {
        return Err(ScaleError::EmptyClimatology);
    }
    if target.is_empty() {
        return Err(ScaleError::EmptyTarget);
    }

    let shape = target.grid_shape();
    let mut climatology_total = Array2::<f64>::zeros(shape);
    for (_, segment) in climatology.iter() {
        if segment.grid_shape() != shape {
            return Err(ScaleError::GridMismatch {
                field: "climatology",
                expected: shape,
                got: segment.grid_shape(),
            });
        }
        climatology_total += &segment.values().sum_axis(Axis(0));
    }
    climatology_total /= climatology.len() as f64;

    let target_total = target.values().sum_axis(Axis(0));

    let mut factor = Array2::<f64>::ones(shape);
    let mut degenerate = Vec::new();
    for ((row, col), f) in factor.indexed_iter_mut() {
        let clim = climatology_total[[row, col]];
        let total = target_total[[row, col]];
        if !total.is_finite() || !clim.is_finite() || total.abs() <= config.min_target_total() {
            match config.policy() {
                DegeneratePolicy::Fail => {
                    return Err(ScaleError::DegenerateScale { row, col, total });
                }
                DegeneratePolicy::Unscaled => {
                    warn!(row, col, total, "degenerate target total, cell left unscaled");
                    degenerate.push((row, col));
                    continue;
                }
            }
        }
        *f = clim / total;
    }

    info!(
        years = climatology.len(),
        degenerate = degenerate.len(),
        "computed scale factors"
    );
    Ok(ScaleFactor {
        factor,
        climatology_total,
        target_total,
        degenerate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use ndarray::Array3;
    use pluvia_calendar::YearMarker;
    use pluvia_seasons::{SeasonBoundary, SeasonKind, extract};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Daily series 2001..2004 on a 1x2 grid: cell 0 rains `a`, cell 1 rains `b`.
    fn series(a: f64, b: f64) -> TimeSeries {
        let start = at(2001, 1, 1);
        let n = (at(2004, 1, 1) - start).num_days() as usize;
        let times = (0..n).map(|i| start + TimeDelta::days(i as i64)).collect();
        let values = Array3::from_shape_fn((n, 1, 2), |(_, _, i)| if i == 0 { a } else { b });
        TimeSeries::new(times, values).unwrap()
    }

    fn boundary() -> SeasonBoundary {
        SeasonBoundary::new(
            YearMarker::new(3, 1, 0).unwrap(),
            YearMarker::new(5, 1, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn ratio_of_totals() {
        let clim_series = series(2.0, 1.0);
        let clim = extract(&clim_series, &[2001], &boundary(), SeasonKind::Dry);
        let target = series(1.0, 4.0).between(at(2002, 3, 1), at(2002, 5, 1));

        let f = compute_scale_factor(&clim, &target, &ScaleConfig::new()).unwrap();
        assert_relative_eq!(f.factor()[[0, 0]], 2.0, epsilon = 1e-12);
        assert_relative_eq!(f.factor()[[0, 1]], 0.25, epsilon = 1e-12);
        assert_relative_eq!(f.climatology_total()[[0, 0]], 2.0 * 61.0, epsilon = 1e-9);
        assert!(f.degenerate_cells().is_empty());
    }

    #[test]
    fn zero_target_fails_by_default() {
        let clim = extract(&series(1.0, 1.0), &[2001], &boundary(), SeasonKind::Dry);
        let target = series(1.0, 0.0).between(at(2002, 3, 1), at(2002, 5, 1));
        assert_eq!(
            compute_scale_factor(&clim, &target, &ScaleConfig::new()).unwrap_err(),
            ScaleError::DegenerateScale {
                row: 0,
                col: 1,
                total: 0.0,
            }
        );
    }

    #[test]
    fn zero_target_unscaled_policy() {
        let clim = extract(&series(1.0, 1.0), &[2001], &boundary(), SeasonKind::Dry);
        let target = series(2.0, 0.0).between(at(2002, 3, 1), at(2002, 5, 1));
        let config = ScaleConfig::new().with_policy(DegeneratePolicy::Unscaled);
        let f = compute_scale_factor(&clim, &target, &config).unwrap();
        assert_relative_eq!(f.factor()[[0, 0]], 0.5, epsilon = 1e-12);
        assert_eq!(f.factor()[[0, 1]], 1.0);
        assert_eq!(f.degenerate_cells(), &[(0, 1)]);
    }

    #[test]
    fn empty_inputs() {
        let s = series(1.0, 1.0);
        let clim = extract(&s, &[], &boundary(), SeasonKind::Wet);
        assert_eq!(
            compute_scale_factor(&clim, &s, &ScaleConfig::new()).unwrap_err(),
            ScaleError::EmptyClimatology
        );
        let clim = extract(&s, &[2001], &boundary(), SeasonKind::Wet);
        let empty = s.between(at(1990, 1, 1), at(1990, 1, 2));
        assert_eq!(
            compute_scale_factor(&clim, &empty, &ScaleConfig::new()).unwrap_err(),
            ScaleError::EmptyTarget
        );
    }
}
