//! Land/sea masking of gridded fields.

use ndarray::{Array2, ArrayView2, Axis, Zip};
use pluvia_stats::nanmean;

use crate::error::TimeSeriesError;
use crate::series::TimeSeries;

/// Boolean ocean mask on the model grid.
///
/// Built from a water-fraction field in percent: a cell whose water fraction
/// exceeds the threshold counts as ocean.
#[derive(Debug, Clone, PartialEq)]
pub struct LandMask {
    ocean: Array2<bool>,
}

impl LandMask {
    /// Builds a mask from a water-percentage field.
    ///
    /// NaN fractions are treated as land.
    pub fn from_water_fraction(water: ArrayView2<'_, f64>, threshold: f64) -> Self {
        Self {
            ocean: water.mapv(|w| w > threshold),
        }
    }

    /// A mask with no ocean cells.
    pub fn all_land(shape: (usize, usize)) -> Self {
        Self {
            ocean: Array2::from_elem(shape, false),
        }
    }

    /// Returns the grid shape `(lat, lon)`.
    pub fn shape(&self) -> (usize, usize) {
        self.ocean.dim()
    }

    /// Returns `true` if cell `(row, col)` is ocean.
    pub fn is_ocean(&self, row: usize, col: usize) -> bool {
        self.ocean[[row, col]]
    }

    /// Number of ocean cells.
    pub fn n_ocean(&self) -> usize {
        self.ocean.iter().filter(|&&o| o).count()
    }

    /// Reverses the latitude axis, for sources stored south to north.
    pub fn flipped_lat(&self) -> Self {
        Self {
            ocean: self.ocean.slice(ndarray::s![..;-1, ..]).to_owned(),
        }
    }
}

/// Sets every ocean cell of every time step to NaN.
///
/// # Errors
///
/// Returns [`TimeSeriesError::GridMismatch`] if the mask and series grids differ.
pub fn mask_ocean(series: &TimeSeries, mask: &LandMask) -> Result<TimeSeries, TimeSeriesError> {
    if series.grid_shape() != mask.shape() {
        return Err(TimeSeriesError::GridMismatch {
            expected: series.grid_shape(),
            got: mask.shape(),
        });
    }
    let mut values = series.values().clone();
    for mut step in values.axis_iter_mut(Axis(0)) {
        Zip::from(&mut step).and(&mask.ocean).for_each(|v, &ocean| {
            if ocean {
                *v = f64::NAN;
            }
        });
    }
    series.with_values(values)
}

/// NaN-aware mean over the grid at every time step.
pub fn spatial_mean(series: &TimeSeries) -> Vec<f64> {
    series
        .values()
        .axis_iter(Axis(0))
        .map(|step| nanmean(step.iter()))
        .collect()
}
