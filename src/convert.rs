//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, anyhow};

use pluvia_hourly::ExperimentPeriod;
use pluvia_io::{MaskConfig, ReaderConfig};
use pluvia_scale::{DegeneratePolicy, ScaleConfig};
use pluvia_seasons::SeasonConfig;

use crate::config::*;

/// Parses a degenerate-cell policy name into the corresponding enum variant.
pub fn parse_policy(s: &str) -> Result<DegeneratePolicy> {
    s.to_lowercase().parse().map_err(|e: String| anyhow!(e))
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoConfig) -> Result<ReaderConfig> {
    let cfg = ReaderConfig::default().with_time_var(&io.time_var);
    cfg.validate().context("invalid [io] reader settings")?;
    Ok(cfg)
}

/// Builds a [`MaskConfig`] from the TOML I/O configuration.
pub fn build_mask_config(io: &IoConfig) -> Result<MaskConfig> {
    let cfg = MaskConfig::default()
        .with_var(&io.mask_var)
        .with_ocean_threshold(io.ocean_threshold)
        .with_flip_lat(io.mask_flip_lat);
    cfg.validate().context("invalid [io] mask settings")?;
    Ok(cfg)
}

/// Builds a [`SeasonConfig`] from the TOML seasons configuration.
pub fn build_season_config(seasons: &SeasonsToml) -> Result<SeasonConfig> {
    let cfg = SeasonConfig::new()
        .with_window_days(seasons.window_days)
        .with_threshold(seasons.threshold);
    cfg.validate().context("invalid [seasons] settings")?;
    Ok(cfg)
}

/// Builds a [`ScaleConfig`] from the TOML scale configuration.
pub fn build_scale_config(scale: &ScaleToml) -> Result<ScaleConfig> {
    let cfg = ScaleConfig::new()
        .with_min_target_total(scale.min_target_total)
        .with_policy(parse_policy(&scale.on_degenerate)?);
    cfg.validate().context("invalid [scale] settings")?;
    Ok(cfg)
}

/// Builds an [`ExperimentPeriod`] from the TOML experiment configuration.
///
/// Both bounds are required.
pub fn build_experiment_period(experiment: &ExperimentToml) -> Result<ExperimentPeriod> {
    let (Some(start), Some(end)) = (experiment.start, experiment.end) else {
        return Err(anyhow!(
            "no experiment period: set [experiment].start and [experiment].end"
        ));
    };
    ExperimentPeriod::new(start, end).context("invalid [experiment] period")
}
