//! Pipeline stages shared by the `run` and `seasons` commands.

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDateTime;
use tracing::info;

use pluvia_io::{Grid, read_land_sea_mask, read_variable};
use pluvia_seasons::{SeasonBoundary, aggregate, build_windows, detect_dry_season, seasonal_years};
use pluvia_timeseries::{
    EndBound, LandMask, TimeSeries, Variable, fill_invalid, mask_ocean, remove_leap_days, select,
};

use crate::config::PluviaConfig;
use crate::convert;

/// A variable after gap filling, range selection and leap-day removal.
pub struct Prepared {
    pub series: TimeSeries,
    pub grid: Grid,
    /// Timestamps of the steps replaced by gap filling.
    pub filled: Vec<NaiveDateTime>,
}

/// Reads `variable` and brings it onto the analysis time axis.
///
/// Gap filling applies to precipitation only.
pub fn prepare(config: &PluviaConfig, variable: Variable) -> Result<Prepared> {
    let path = config.io.inputs.get(variable).ok_or_else(|| {
        anyhow!(
            "no input for {variable}: set [io.inputs].{} in config",
            variable.key()
        )
    })?;
    let reader_cfg = convert::build_reader_config(&config.io)?;

    info!(variable = %variable, path = %path.display(), "reading input");
    let (series, grid) = read_variable(path, variable.source_name(), &reader_cfg)
        .with_context(|| format!("failed to read {variable} from {}", path.display()))?;

    let (series, filled) = if variable == Variable::Precip {
        let gap_fill = fill_invalid(&series, config.gap_fill.sentinel)
            .with_context(|| format!("gap filling failed for {variable}"))?;
        let filled = gap_fill.filled().to_vec();
        (gap_fill.into_series(), filled)
    } else {
        (series, Vec::new())
    };

    let (Some(first), Some(last)) = (series.first_time(), series.last_time()) else {
        bail!("{variable} input {} has no time steps", path.display());
    };
    let start = config.period.start.unwrap_or(first);
    let end = config.period.end.unwrap_or(last);
    let series = remove_leap_days(&select(&series, start, end, EndBound::Inclusive));
    if series.is_empty() {
        bail!("{variable} has no time steps between {start} and {end}");
    }

    info!(
        variable = %variable,
        steps = series.len(),
        filled = filled.len(),
        "prepared input"
    );
    Ok(Prepared {
        series,
        grid,
        filled,
    })
}

/// Outcome of dry-season detection.
pub struct SeasonReport {
    pub boundary: SeasonBoundary,
    pub window_days: u16,
    pub n_windows: usize,
    /// Years whose dry and wet seasons both lie inside the data.
    pub years: Vec<i32>,
}

/// Masks ocean cells, aggregates window means and detects the dry season.
pub fn detect_seasons(config: &PluviaConfig, precip: &TimeSeries) -> Result<SeasonReport> {
    let season_cfg = convert::build_season_config(&config.seasons)?;

    let mask = match &config.io.mask {
        Some(path) => {
            let mask_cfg = convert::build_mask_config(&config.io)?;
            read_land_sea_mask(path, &mask_cfg)
                .with_context(|| format!("failed to read land/sea mask {}", path.display()))?
        }
        None => LandMask::all_land(precip.grid_shape()),
    };
    let masked = mask_ocean(precip, &mask).context("land/sea mask does not fit the grid")?;

    let windows = build_windows(season_cfg.window_days())?;
    let means = aggregate(&masked, &windows);
    let boundary =
        detect_dry_season(&means, season_cfg.threshold()).context("dry-season detection failed")?;
    let years = seasonal_years(precip, &boundary);
    if years.is_empty() {
        bail!("no year has both a complete dry and wet season in the analysis period");
    }

    Ok(SeasonReport {
        boundary,
        window_days: season_cfg.window_days(),
        n_windows: means.n_windows(),
        years,
    })
}
