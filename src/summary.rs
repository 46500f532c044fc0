//! JSON run summaries.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use pluvia_scale::ScaleSummary;

use crate::analysis::SeasonReport;

/// Detected season boundary.
#[derive(Debug, Serialize)]
pub struct SeasonSummary {
    /// Dry-season start as `MM-DD HH:00`.
    pub dry_start: String,
    pub dry_end: String,
    pub window_days: u16,
    pub n_windows: usize,
    pub seasonal_years: Vec<i32>,
}

impl From<&SeasonReport> for SeasonSummary {
    fn from(report: &SeasonReport) -> Self {
        Self {
            dry_start: report.boundary.dry_start().to_string(),
            dry_end: report.boundary.dry_end().to_string(),
            window_days: report.window_days,
            n_windows: report.n_windows,
            seasonal_years: report.years.clone(),
        }
    }
}

/// Days written for the experiment.
#[derive(Debug, Serialize)]
pub struct ExperimentSummary {
    pub name: String,
    pub start: NaiveDate,
    /// Exclusive end.
    pub end: NaiveDate,
    pub written: usize,
    pub skipped: usize,
}

/// Top-level summary written by `run` and `seasons`.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub analysis_start: Option<NaiveDateTime>,
    pub analysis_end: Option<NaiveDateTime>,
    /// Precipitation steps replaced by interpolation.
    pub filled_gaps: Vec<NaiveDateTime>,
    pub seasons: SeasonSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment: Option<ExperimentSummary>,
}

/// Writes `value` as pretty-printed JSON, creating the parent directory.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("failed to serialize summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write summary: {}", path.display()))?;
    info!(path = %path.display(), "summary written");
    Ok(())
}
