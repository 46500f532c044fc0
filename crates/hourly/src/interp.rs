//! Piecewise-linear interpolation along the time axis.

use ndarray::{Array3, ArrayView1, Axis};
use rayon::prelude::*;

use crate::error::HourlyError;

/// Interpolates every cell of `values` from `offsets` to `targets`.
///
/// `values` is `[offsets.len(), lat, lon]`; the result is
/// `[targets.len(), lat, lon]`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`HourlyError::EmptyInput`] | no offsets |
/// | [`HourlyError::LengthMismatch`] | `offsets.len()` differs from the time axis |
/// | [`HourlyError::NonMonotonicOffsets`] | offsets not strictly increasing |
/// | [`HourlyError::OutOfRange`] | a target outside `[offsets[0], offsets[last]]` |
pub fn interpolate_linear(
    targets: &[f64],
    offsets: &[f64],
    values: &Array3<f64>,
) -> Result<Array3<f64>, HourlyError> {
    check_offsets(offsets, values)?;
    let weights = targets
        .iter()
        .map(|&x| segment_weight(x, offsets))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(map_cells(values, targets.len(), |series| {
        weights
            .iter()
            .map(|&(lo, w)| {
                if w == 0.0 {
                    series[lo]
                } else {
                    (1.0 - w) * series[lo] + w * series[lo + 1]
                }
            })
            .collect()
    }))
}

/// Validates source offsets against the values' time axis.
pub(crate) fn check_offsets<T: PartialOrd>(
    offsets: &[T],
    values: &Array3<f64>,
) -> Result<(), HourlyError> {
    if offsets.is_empty() {
        return Err(HourlyError::EmptyInput);
    }
    let steps = values.len_of(Axis(0));
    if offsets.len() != steps {
        return Err(HourlyError::LengthMismatch {
            field: "offsets",
            expected: steps,
            got: offsets.len(),
        });
    }
    if let Some(index) = (1..offsets.len()).find(|&i| offsets[i] <= offsets[i - 1]) {
        return Err(HourlyError::NonMonotonicOffsets { index });
    }
    Ok(())
}

/// Locates `x` in `offsets`: the left index and the weight of its right
/// neighbour. An exact hit returns weight 0.
pub(crate) fn segment_weight(x: f64, offsets: &[f64]) -> Result<(usize, f64), HourlyError> {
    let min = offsets[0];
    let max = offsets[offsets.len() - 1];
    if !(min..=max).contains(&x) {
        return Err(HourlyError::OutOfRange {
            target: x,
            min,
            max,
        });
    }
    // Index of the first offset strictly greater than x.
    let upper = offsets.partition_point(|&o| o <= x);
    let lo = upper - 1;
    if offsets[lo] == x {
        return Ok((lo, 0.0));
    }
    Ok((lo, (x - offsets[lo]) / (offsets[lo + 1] - offsets[lo])))
}

/// Applies `f` to the time series of every cell in parallel and assembles
/// the `[n_out, lat, lon]` result.
pub(crate) fn map_cells<F>(values: &Array3<f64>, n_out: usize, f: F) -> Array3<f64>
where
    F: Fn(ArrayView1<'_, f64>) -> Vec<f64> + Sync,
{
    let (_, ny, nx) = values.dim();
    let columns: Vec<Vec<f64>> = (0..ny * nx)
        .into_par_iter()
        .map(|cell| {
            let (j, i) = (cell / nx, cell % nx);
            f(values.slice(ndarray::s![.., j, i]))
        })
        .collect();

    let mut out = Array3::<f64>::zeros((n_out, ny, nx));
    for (cell, column) in columns.into_iter().enumerate() {
        let (j, i) = (cell / nx, cell % nx);
        for (t, v) in column.into_iter().enumerate() {
            out[[t, j, i]] = v;
        }
    }
    out
}
