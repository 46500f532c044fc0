//! Application of scale factors to the target season.

use ndarray::{Axis, Zip};
use pluvia_seasons::SeasonWindow;
use pluvia_timeseries::TimeSeries;
use tracing::info;

use crate::error::ScaleError;
use crate::factor::ScaleFactor;

/// Multiplies every time step inside `window` by the per-cell factor.
///
/// Steps outside the window are copied unchanged.
///
/// # Errors
///
/// Returns [`ScaleError::GridMismatch`] if the factor grid differs from the
/// series grid.
pub fn apply_scale(
    series: &TimeSeries,
    window: &SeasonWindow,
    factor: &ScaleFactor,
) -> Result<TimeSeries, ScaleError> {
    if factor.shape() != series.grid_shape() {
        return Err(ScaleError::GridMismatch {
            field: "factor",
            expected: series.grid_shape(),
            got: factor.shape(),
        });
    }

    let mut values = series.values().clone();
    let mut scaled = 0usize;
    for (t, mut step) in values.axis_iter_mut(Axis(0)).enumerate() {
        if !window.contains(series.times()[t]) {
            continue;
        }
        Zip::from(&mut step)
            .and(factor.factor())
            .for_each(|v, &f| *v *= f);
        scaled += 1;
    }

    info!(
        start = %window.start(),
        end = %window.end(),
        steps = scaled,
        "scaled target season"
    );
    Ok(series.with_values(values)?)
}
