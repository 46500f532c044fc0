//! Serializable summary of a scaling run.

use chrono::NaiveDateTime;
use pluvia_seasons::SeasonWindow;
use pluvia_stats::nanmean;
use serde::Serialize;

use crate::factor::ScaleFactor;

/// Domain-level summary of the scale factors applied to one target season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleSummary {
    pub target_year: i32,
    pub wet_start: NaiveDateTime,
    pub wet_end: NaiveDateTime,
    /// Domain mean of the climatological wet-season totals.
    pub climatology_mean_total: f64,
    /// Domain mean of the target wet-season totals before scaling.
    pub target_mean_total: f64,
    pub factor_min: f64,
    pub factor_mean: f64,
    pub factor_max: f64,
    pub degenerate_cells: usize,
}

impl ScaleSummary {
    /// Summarises `factor` for the wet season of `target_year`.
    pub fn new(target_year: i32, window: &SeasonWindow, factor: &ScaleFactor) -> Self {
        let finite = || factor.factor().iter().copied().filter(|f| f.is_finite());
        Self {
            target_year,
            wet_start: window.start(),
            wet_end: window.end(),
            climatology_mean_total: nanmean(factor.climatology_total()),
            target_mean_total: nanmean(factor.target_total()),
            factor_min: finite().fold(f64::NAN, f64::min),
            factor_mean: nanmean(factor.factor()),
            factor_max: finite().fold(f64::NAN, f64::max),
            degenerate_cells: factor.degenerate_cells().len(),
        }
    }
}
