//! Mass-conserving disaggregation of accumulated precipitation.
//!
//! A source value is the accumulation over the fixed interval that ends at
//! its offset. The hourly series is first interpolated linearly, then every
//! bin of hours belonging to one source value is rescaled so that it sums
//! to that value. Hours in no bin, such as those inside a removed leap day,
//! keep their linear value.

use ndarray::Array3;

use crate::error::HourlyError;
use crate::interp::{check_offsets, map_cells};

/// Disaggregates accumulations over `interval` hours, at integer-hour
/// `offsets`, to hourly values at `targets`.
///
/// Source value `i` owns the hours `(offsets[i] - interval, offsets[i]]`
/// of the grid `offsets[0]..=offsets[last]`, so the first owns only
/// `offsets[0]`. After rescaling, each bin sums to its source value; a zero
/// source value gives a zero bin, and a bin whose linear profile sums to
/// zero is filled evenly.
///
/// # Errors
///
/// Same as [`interpolate_linear`](crate::interpolate_linear); targets must
/// lie in `[offsets[0], offsets[last]]`. Returns
/// [`HourlyError::InvalidInterval`] unless `interval` is positive.
pub fn interpolate_precip(
    targets: &[i64],
    offsets: &[i64],
    values: &Array3<f64>,
    interval: i64,
) -> Result<Array3<f64>, HourlyError> {
    if interval <= 0 {
        return Err(HourlyError::InvalidInterval { interval });
    }
    check_offsets(offsets, values)?;
    let min = offsets[0];
    let max = offsets[offsets.len() - 1];
    let positions = targets
        .iter()
        .map(|&x| {
            if (min..=max).contains(&x) {
                Ok((x - min) as usize)
            } else {
                Err(HourlyError::OutOfRange {
                    target: x as f64,
                    min: min as f64,
                    max: max as f64,
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(map_cells(values, targets.len(), |series| {
        let hourly = disaggregate(offsets, &series.to_vec(), interval);
        positions.iter().map(|&p| hourly[p]).collect()
    }))
}

/// Disaggregates one cell onto the hourly grid `offsets[0]..=offsets[last]`.
fn disaggregate(offsets: &[i64], values: &[f64], interval: i64) -> Vec<f64> {
    let min = offsets[0];
    let max = offsets[offsets.len() - 1];

    // Linear profile on the hourly grid.
    let mut hourly = Vec::with_capacity((max - min + 1) as usize);
    let mut k = 0;
    for x in min..=max {
        while offsets[k] < x {
            k += 1;
        }
        if offsets[k] == x {
            hourly.push(values[k]);
        } else {
            let (x0, x1) = (offsets[k - 1], offsets[k]);
            let w = (x - x0) as f64 / (x1 - x0) as f64;
            hourly.push((1.0 - w) * values[k - 1] + w * values[k]);
        }
    }

    // Rescale each bin to its source value.
    for (&offset, &value) in offsets.iter().zip(values) {
        let lo = ((offset - interval + 1).max(min) - min) as usize;
        let hi = (offset - min) as usize;
        let bin = &mut hourly[lo..=hi];
        if value == 0.0 {
            bin.fill(0.0);
            continue;
        }
        let sum: f64 = bin.iter().sum();
        if sum == 0.0 {
            bin.fill(value / bin.len() as f64);
        } else {
            let ratio = value / sum;
            bin.iter_mut().for_each(|v| *v *= ratio);
        }
    }
    hourly
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn column(values: &[f64]) -> Array3<f64> {
        Array3::from_shape_vec((values.len(), 1, 1), values.to_vec()).unwrap()
    }

    #[test]
    fn bins_sum_to_source_values() {
        let offsets = [-3, 0, 3, 6, 9];
        let values = [0.6, 1.2, 0.0, 3.0, 0.3];
        let hourly = disaggregate(&offsets, &values, 3);
        assert_eq!(hourly.len(), 13);
        // Bin of offset 0 is hours -2, -1, 0.
        assert_relative_eq!(hourly[1..=3].iter().sum::<f64>(), 1.2, max_relative = 1e-12);
        assert!(hourly[4..=6].iter().all(|v| *v == 0.0));
        assert_relative_eq!(hourly[7..=9].iter().sum::<f64>(), 3.0, max_relative = 1e-12);
        assert_relative_eq!(hourly[10..=12].iter().sum::<f64>(), 0.3, max_relative = 1e-12);
        assert_eq!(hourly[0], 0.6);
    }

    #[test]
    fn constant_rate_splits_evenly() {
        let out = interpolate_precip(&[1, 2, 3], &[0, 3], &column(&[3.0, 3.0]), 3).unwrap();
        for v in out.iter() {
            assert_relative_eq!(*v, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_profile_with_nonzero_value_fills_evenly() {
        // Hours 1 and 2 interpolate to -1 and 1 and sum to zero.
        let hourly = disaggregate(&[0, 2], &[-3.0, 1.0], 2);
        assert_eq!(&hourly[1..=2], &[0.5, 0.5]);
    }

    #[test]
    fn targets_select_from_hourly_grid() {
        let values = column(&[0.0, 0.9, 0.0]);
        let out = interpolate_precip(&[0, 1, 2, 3], &[-3, 0, 3], &values, 3).unwrap();
        let got: Vec<f64> = out.iter().copied().collect();
        // Profile 0.3, 0.6, 0.9 over hours -2..=0 is halved to sum to 0.9.
        assert_relative_eq!(got[0], 0.45, epsilon = 1e-12);
        // Hours 1..=3 belong to the zero value at offset 3.
        assert_eq!(&got[1..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn hours_outside_every_bin_keep_linear_profile() {
        // A 9-hour gap: only hours 7..=9 belong to the value at offset 9.
        let hourly = disaggregate(&[0, 9], &[0.3, 0.3], 3);
        assert_eq!(hourly.len(), 10);
        for v in &hourly[1..=6] {
            assert_relative_eq!(*v, 0.3, epsilon = 1e-12);
        }
        for v in &hourly[7..=9] {
            assert_relative_eq!(*v, 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn non_positive_interval() {
        assert_eq!(
            interpolate_precip(&[0], &[0, 3], &column(&[1.0, 1.0]), 0).unwrap_err(),
            HourlyError::InvalidInterval { interval: 0 }
        );
    }

    #[test]
    fn target_outside_grid() {
        assert_eq!(
            interpolate_precip(&[4], &[0, 3], &column(&[1.0, 1.0]), 3).unwrap_err(),
            HourlyError::OutOfRange {
                target: 4.0,
                min: 0.0,
                max: 3.0,
            }
        );
    }
}
