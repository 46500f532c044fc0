//! Run command: seasons, scaling and daily BEPS output.

use anyhow::{Context, Result, anyhow, ensure};
use tracing::{info, info_span};

use pluvia_hourly::{ForcingSet, daily_record, experiment_days};
use pluvia_io::{WriteOutcome, write_daily_record};
use pluvia_scale::{ScaleSummary, apply_scale, compute_scale_factor, target_season};
use pluvia_seasons::{SeasonKind, extract};
use pluvia_timeseries::{TimeSeries, Variable};

use crate::analysis::{self, Prepared, SeasonReport};
use crate::cli::RunArgs;
use crate::config::PluviaConfig;
use crate::convert;
use crate::summary::{ExperimentSummary, RunSummary, SeasonSummary, write_json};

/// Run the full pipeline.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    let mut config = PluviaConfig::load(&args.config)?;
    if let Some(year) = args.target_year {
        config.scale.target_year = Some(year);
    }
    if let Some(dir) = args.output_dir {
        config.io.output_dir = dir;
    }
    config.experiment.force |= args.force;
    let period = convert::build_experiment_period(&config.experiment)?;

    // Step 1: Precipitation and season boundary
    let Prepared {
        series: precip,
        grid,
        filled,
    } = analysis::prepare(&config, Variable::Precip)?;
    let report = analysis::detect_seasons(&config, &precip)?;
    info!(
        dry_start = %report.boundary.dry_start(),
        dry_end = %report.boundary.dry_end(),
        years = report.years.len(),
        "season boundary"
    );
    let analysis_start = precip.first_time();
    let analysis_end = precip.last_time();

    // Step 2: Scale the target year's wet season
    let (precip, scale) = if args.no_scale {
        info!("scaling disabled");
        (precip, None)
    } else {
        let (scaled, summary) = scale_target_year(&config, &precip, &report)?;
        (scaled, Some(summary))
    };

    // Step 3: Remaining variables on the same grid
    let prepare_on_grid = |variable: Variable| -> Result<TimeSeries> {
        let prepared = analysis::prepare(&config, variable)?;
        ensure!(
            prepared.grid == grid,
            "{variable} grid differs from the precipitation grid"
        );
        Ok(prepared.series)
    };
    let forcing = ForcingSet::new(
        precip,
        prepare_on_grid(Variable::Temp)?,
        prepare_on_grid(Variable::RelHum)?,
        prepare_on_grid(Variable::Shortwave)?,
        prepare_on_grid(Variable::Wind)?,
    )
    .context("failed to assemble forcing")?;

    // Step 4: Daily BEPS files
    let out_dir = config.io.output_dir.join(&config.experiment.name);
    let days = experiment_days(&forcing, &period).context("failed to list experiment days")?;
    info!(days = days.len(), dir = %out_dir.display(), "writing experiment");

    let (mut written, mut skipped) = (0, 0);
    for day in days {
        let record = daily_record(&forcing, day)
            .with_context(|| format!("failed to build hourly record for {day}"))?;
        match write_daily_record(&out_dir, &record, &grid, config.experiment.force)
            .with_context(|| format!("failed to write BEPS file for {day}"))?
        {
            WriteOutcome::Written(_) => written += 1,
            WriteOutcome::Skipped(_) => skipped += 1,
        }
    }
    info!(written, skipped, "experiment written");

    // Step 5: Summary
    let summary = RunSummary {
        analysis_start,
        analysis_end,
        filled_gaps: filled,
        seasons: SeasonSummary::from(&report),
        scale,
        experiment: Some(ExperimentSummary {
            name: config.experiment.name.clone(),
            start: period.start(),
            end: period.end(),
            written,
            skipped,
        }),
    };
    write_json(&out_dir.join("summary.json"), &summary)
}

/// Scales the wet season of the target year to the climatological total.
fn scale_target_year(
    config: &PluviaConfig,
    precip: &TimeSeries,
    report: &SeasonReport,
) -> Result<(TimeSeries, ScaleSummary)> {
    let target_year = config.scale.target_year.ok_or_else(|| {
        anyhow!("no target year: set [scale].target_year in config or use --target-year")
    })?;
    let scale_cfg = convert::build_scale_config(&config.scale)?;

    let climatology = extract(precip, &report.years, &report.boundary, SeasonKind::Wet);
    let (window, target) = target_season(precip, &report.boundary, target_year)
        .with_context(|| format!("target year {target_year} cannot be scaled"))?;
    let factor = compute_scale_factor(&climatology, &target, &scale_cfg)
        .with_context(|| format!("failed to compute scale factor for {target_year}"))?;
    let scaled = apply_scale(precip, &window, &factor).context("failed to apply scale factor")?;

    let summary = ScaleSummary::new(target_year, &window, &factor);
    info!(
        target_year,
        factor_mean = summary.factor_mean,
        degenerate = summary.degenerate_cells,
        "scaled wet season"
    );
    Ok((scaled, summary))
}
