use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use pluvia_timeseries::Variable;
use serde::Deserialize;

/// Top-level pluvia configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluviaConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Analysis range.
    #[serde(default)]
    pub period: PeriodToml,

    /// Gap filling settings.
    #[serde(default)]
    pub gap_fill: GapFillToml,

    /// Season detection settings.
    #[serde(default)]
    pub seasons: SeasonsToml,

    /// Precipitation scaling settings.
    #[serde(default)]
    pub scale: ScaleToml,

    /// Experiment output settings.
    #[serde(default)]
    pub experiment: ExperimentToml,
}

impl PluviaConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    #[serde(default)]
    pub inputs: InputsToml,
    pub mask: Option<PathBuf>,
    #[serde(default = "default_mask_var")]
    pub mask_var: String,
    #[serde(default = "default_true")]
    pub mask_flip_lat: bool,
    #[serde(default = "default_ocean_threshold")]
    pub ocean_threshold: f64,
    #[serde(default = "default_time_var")]
    pub time_var: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            inputs: InputsToml::default(),
            mask: None,
            mask_var: default_mask_var(),
            mask_flip_lat: true,
            ocean_threshold: default_ocean_threshold(),
            time_var: default_time_var(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_mask_var() -> String {
    "landseamask".to_string()
}
fn default_true() -> bool {
    true
}
fn default_ocean_threshold() -> f64 {
    50.0
}
fn default_time_var() -> String {
    "time".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// Input file per variable.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputsToml {
    pub precip: Option<PathBuf>,
    pub temp: Option<PathBuf>,
    pub rh: Option<PathBuf>,
    pub swd: Option<PathBuf>,
    pub wind: Option<PathBuf>,
}

impl InputsToml {
    /// Returns the input file configured for `variable`.
    pub fn get(&self, variable: Variable) -> Option<&Path> {
        let path = match variable {
            Variable::Precip => &self.precip,
            Variable::Temp => &self.temp,
            Variable::RelHum => &self.rh,
            Variable::Shortwave => &self.swd,
            Variable::Wind => &self.wind,
        };
        path.as_deref()
    }
}

/// Inclusive analysis range; an unset bound keeps the data's own bound.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodToml {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GapFillToml {
    #[serde(default = "default_sentinel")]
    pub sentinel: f64,
}

impl Default for GapFillToml {
    fn default() -> Self {
        Self {
            sentinel: default_sentinel(),
        }
    }
}

fn default_sentinel() -> f64 {
    pluvia_timeseries::DEFAULT_SENTINEL
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonsToml {
    #[serde(default = "default_window_days")]
    pub window_days: u16,
    /// Dry threshold in mm per 3 hours.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for SeasonsToml {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            threshold: default_threshold(),
        }
    }
}

fn default_window_days() -> u16 {
    10
}
fn default_threshold() -> f64 {
    0.02
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleToml {
    pub target_year: Option<i32>,
    #[serde(default = "default_min_target_total")]
    pub min_target_total: f64,
    #[serde(default = "default_on_degenerate")]
    pub on_degenerate: String,
}

impl Default for ScaleToml {
    fn default() -> Self {
        Self {
            target_year: None,
            min_target_total: default_min_target_total(),
            on_degenerate: default_on_degenerate(),
        }
    }
}

fn default_min_target_total() -> f64 {
    1e-9
}
fn default_on_degenerate() -> String {
    "fail".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentToml {
    #[serde(default = "default_experiment_name")]
    pub name: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub force: bool,
}

impl Default for ExperimentToml {
    fn default() -> Self {
        Self {
            name: default_experiment_name(),
            start: None,
            end: None,
            force: false,
        }
    }
}

fn default_experiment_name() -> String {
    "scaled_to_climatology".to_string()
}
