//! Seasons command: detect the dry season and report the boundary.

use anyhow::Result;
use tracing::{info, info_span};

use pluvia_timeseries::Variable;

use crate::analysis;
use crate::cli::SeasonsArgs;
use crate::config::PluviaConfig;
use crate::summary::{RunSummary, SeasonSummary, write_json};

/// Run season detection only.
pub fn run(args: SeasonsArgs) -> Result<()> {
    let _cmd = info_span!("seasons").entered();
    let config = PluviaConfig::load(&args.config)?;

    let precip = analysis::prepare(&config, Variable::Precip)?;
    let report = analysis::detect_seasons(&config, &precip.series)?;
    info!(
        dry_start = %report.boundary.dry_start(),
        dry_end = %report.boundary.dry_end(),
        years = report.years.len(),
        "season boundary"
    );

    let summary = RunSummary {
        analysis_start: precip.series.first_time(),
        analysis_end: precip.series.last_time(),
        filled_gaps: precip.filled,
        seasons: SeasonSummary::from(&report),
        scale: None,
        experiment: None,
    };
    let path = args
        .output
        .unwrap_or_else(|| config.io.output_dir.join("summary.json"));
    write_json(&path, &summary)
}
