//! Per-year, per-window temporal means.

use chrono::NaiveDateTime;
use ndarray::Array2;
use pluvia_stats::nanmean;
use pluvia_timeseries::{TimeSeries, spatial_mean};
use tracing::debug;

use crate::window::AveragingWindow;

/// Window means of a series: one row per distinct year, one column per window.
///
/// The start, mid and end matrices have the same shape as the means.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowMeans {
    window_days: u16,
    years: Vec<i32>,
    means: Array2<f64>,
    start: Array2<NaiveDateTime>,
    mid: Array2<NaiveDateTime>,
    end: Array2<NaiveDateTime>,
}

impl WindowMeans {
    /// Returns the nominal length in days of the windows, or 0 if there
    /// were none.
    pub fn window_days(&self) -> u16 {
        self.window_days
    }

    /// Returns the years, one per row, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Returns the `[year, window]` means. NaN where a window has no samples.
    pub fn means(&self) -> &Array2<f64> {
        &self.means
    }

    /// Returns the `[year, window]` window start timestamps.
    pub fn start(&self) -> &Array2<NaiveDateTime> {
        &self.start
    }

    /// Returns the `[year, window]` window midpoints.
    pub fn mid(&self) -> &Array2<NaiveDateTime> {
        &self.mid
    }

    /// Returns the `[year, window]` window end timestamps.
    pub fn end(&self) -> &Array2<NaiveDateTime> {
        &self.end
    }

    /// Number of windows (columns).
    pub fn n_windows(&self) -> usize {
        self.means.ncols()
    }
}

/// Computes the NaN-aware mean of every window in every year of `series`.
///
/// The series is first reduced to its domain mean per time step with
/// [`spatial_mean`]; the window mean is the NaN-aware mean of those values
/// over `[start(Y), end(Y))`. Windows without samples get NaN and a debug log.
pub fn aggregate(series: &TimeSeries, windows: &[AveragingWindow]) -> WindowMeans {
    let years = series.years();
    let shape = (years.len(), windows.len());
    let times = series.times();
    let domain = spatial_mean(series);

    let mut means = Array2::<f64>::from_elem(shape, f64::NAN);
    let mut starts = Vec::with_capacity(shape.0 * shape.1);
    let mut mids = Vec::with_capacity(shape.0 * shape.1);
    let mut ends = Vec::with_capacity(shape.0 * shape.1);

    for (iy, &year) in years.iter().enumerate() {
        for (iw, window) in windows.iter().enumerate() {
            let (start, end) = window.bounds(year);
            let lo = times.partition_point(|t| *t < start);
            let hi = times.partition_point(|t| *t < end);
            if lo < hi {
                means[[iy, iw]] = nanmean(domain[lo..hi].iter());
            } else {
                debug!(year, window = iw, %start, %end, "no samples in averaging window");
            }
            starts.push(start);
            mids.push(window.mid(year));
            ends.push(end);
        }
    }

    WindowMeans {
        window_days: windows.first().map_or(0, AveragingWindow::days),
        years,
        means,
        start: to_matrix(shape, starts),
        mid: to_matrix(shape, mids),
        end: to_matrix(shape, ends),
    }
}

fn to_matrix(shape: (usize, usize), data: Vec<NaiveDateTime>) -> Array2<NaiveDateTime> {
    Array2::from_shape_vec(shape, data)
        // Safety: one entry was pushed per (year, window) pair.
        .expect("timestamp count matches the window-mean shape")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::build_windows;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, TimeDelta};
    use ndarray::{Array3, s};
    use pluvia_calendar::step_sequence;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn constant_field_gives_constant_means() {
        let times = step_sequence(at(2001, 1, 1), at(2003, 1, 1), TimeDelta::hours(3), false);
        let values = Array3::from_elem((times.len(), 2, 2), 0.7);
        let series = TimeSeries::new(times, values).unwrap();
        let windows = build_windows(30).unwrap();

        let wm = aggregate(&series, &windows);
        assert_eq!(wm.years(), &[2001, 2002]);
        assert_eq!(wm.means().dim(), (2, 12));
        assert_eq!(wm.window_days(), 30);
        for m in wm.means() {
            assert_relative_eq!(*m, 0.7, epsilon = 1e-12);
        }
        assert_eq!(wm.start()[[1, 0]], at(2002, 1, 1));
        assert_eq!(wm.end()[[1, 11]], at(2003, 1, 1));
        assert_eq!(wm.mid()[[0, 0]], at(2001, 1, 16));
    }

    #[test]
    fn missing_window_is_nan() {
        // Only January and February of 2001.
        let times = step_sequence(at(2001, 1, 1), at(2001, 3, 1), TimeDelta::hours(3), false);
        let values = Array3::from_elem((times.len(), 1, 1), 1.0);
        let series = TimeSeries::new(times, values).unwrap();
        let windows = build_windows(30).unwrap();

        let wm = aggregate(&series, &windows);
        assert_relative_eq!(wm.means()[[0, 0]], 1.0);
        assert!(wm.means()[[0, 5]].is_nan());
        assert!(wm.means()[[0, 11]].is_nan());
    }

    #[test]
    fn nan_cells_are_skipped() {
        let times = step_sequence(at(2001, 1, 1), at(2002, 1, 1), TimeDelta::days(1), false);
        let mut values = Array3::from_elem((times.len(), 1, 2), 2.0);
        values.slice_mut(s![.., 0, 0]).fill(f64::NAN);
        let series = TimeSeries::new(times, values).unwrap();
        let wm = aggregate(&series, &build_windows(73).unwrap());
        assert!(wm.means().iter().all(|m| (*m - 2.0).abs() < 1e-12));
    }

    #[test]
    fn steps_are_reduced_to_domain_means_first() {
        let times = vec![at(2001, 1, 1), at(2001, 1, 2)];
        let values = Array3::from_shape_vec((2, 1, 2), vec![1.0, f64::NAN, 3.0, 5.0]).unwrap();
        let series = TimeSeries::new(times, values).unwrap();
        let wm = aggregate(&series, &build_windows(365).unwrap());
        // Domain means 1.0 and 4.0, not the pooled mean of 1, 3 and 5.
        assert_relative_eq!(wm.means()[[0, 0]], 2.5, epsilon = 1e-12);
    }

    #[test]
    fn empty_series_has_no_rows() {
        let series = TimeSeries::new(vec![], Array3::zeros((0, 1, 1))).unwrap();
        let wm = aggregate(&series, &build_windows(10).unwrap());
        assert_eq!(wm.means().dim(), (0, 36));
        assert_eq!(wm.n_windows(), 36);
    }
}
