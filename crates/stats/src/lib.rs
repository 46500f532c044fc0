//! NaN-aware statistical reductions for the pluvia pipeline.
//!
//! Missing data travels through the pipeline as NaN (ocean cells after
//! masking, windows without samples). Every reduction here skips NaN values
//! and returns NaN when nothing finite is left.

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Mean of the non-NaN values. Returns NaN if there are none.
pub fn nanmean<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut sum = 0.0;
    let mut n = 0usize;
    for &v in values {
        if !v.is_nan() {
            sum += v;
            n += 1;
        }
    }
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Median of the non-NaN values. Returns NaN if there are none.
pub fn nanmedian<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut finite: Vec<f64> = values.into_iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return f64::NAN;
    }
    finite.sort_by(f64::total_cmp);
    median(&finite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_median_odd() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0]), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_median_even() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5, epsilon = 1e-6);
    }

    #[test]
    #[should_panic(expected = "median: input must not be empty")]
    fn test_median_empty_panics() {
        median(&[]);
    }

    #[test]
    fn test_nanmean_skips_nan() {
        assert_relative_eq!(nanmean(&[1.0, f64::NAN, 3.0]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nanmean_all_nan() {
        assert!(nanmean(&[f64::NAN]).is_nan());
    }

    #[test]
    fn test_nanmean_empty() {
        let empty: [f64; 0] = [];
        assert!(nanmean(&empty).is_nan());
    }

    #[test]
    fn test_nanmedian_unsorted_with_nan() {
        let data = [5.0, f64::NAN, 1.0, 3.0, f64::NAN];
        assert_relative_eq!(nanmedian(&data), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nanmedian_even() {
        let data = [4.0, 1.0, f64::NAN, 2.0, 3.0];
        assert_relative_eq!(nanmedian(&data), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_nanmedian_all_nan() {
        assert!(nanmedian(&[f64::NAN, f64::NAN]).is_nan());
    }

    #[test]
    fn test_nan_reductions_accept_iterators() {
        let v = vec![1.0, 2.0, f64::NAN];
        assert_relative_eq!(nanmean(v.iter()), 1.5, epsilon = 1e-12);
        assert_relative_eq!(nanmedian(v.iter().take(2)), 1.5, epsilon = 1e-12);
    }
}
