//! Daily BEPS forcing files.
//!
//! One NetCDF file per day with an unlimited `time` dimension holding the
//! 24 output hours, `lat`/`lon` coordinates and the five forcing fields.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use ndarray::Array3;
use pluvia_hourly::DailyRecord;
use pluvia_timeseries::Variable;
use tracing::{debug, info};

use crate::error::IoError;
use crate::reader::Grid;
use crate::time::{TimeUnit, TimeUnits};

/// Result of writing one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new file was written.
    Written(PathBuf),
    /// The file already existed and `force` was not set.
    Skipped(PathBuf),
}

impl WriteOutcome {
    /// Returns the path of the daily file, written or not.
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written(p) | WriteOutcome::Skipped(p) => p,
        }
    }
}

/// File name of the BEPS forcing for `date`.
pub fn beps_file_name(date: NaiveDate) -> String {
    format!("beps_meteo_0.1_{}.nc", date.format("%Y%m%d"))
}

/// BEPS variable name and units of a forcing variable.
pub fn beps_variable(variable: Variable) -> (&'static str, &'static str) {
    match variable {
        Variable::Precip => ("PRCP", "mm/h"),
        Variable::RelHum => ("RH", " "),
        Variable::Shortwave => ("SSRD", "W/m2"),
        Variable::Temp => ("T", "K"),
        Variable::Wind => ("WS", "m/s"),
    }
}

/// Variables in file order.
const FILE_ORDER: [Variable; 5] = [
    Variable::Precip,
    Variable::RelHum,
    Variable::Shortwave,
    Variable::Temp,
    Variable::Wind,
];

/// Write `record` to `dir/beps_meteo_0.1_YYYYMMDD.nc`.
///
/// An existing file is left untouched unless `force` is set. The output
/// directory is created if needed.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] if the record grid differs from
/// `grid`, [`IoError::OutputDir`] if the directory cannot be created, and
/// [`IoError::Netcdf`] on write failures.
pub fn write_daily_record(
    dir: &Path,
    record: &DailyRecord,
    grid: &Grid,
    force: bool,
) -> Result<WriteOutcome, IoError> {
    let (ny, nx) = grid.shape();
    let nt = record.hours().len();
    for variable in FILE_ORDER {
        let (t, y, x) = record.get(variable).dim();
        for (name, expected, got) in [("time", nt, t), ("lat", ny, y), ("lon", nx, x)] {
            if expected != got {
                return Err(IoError::DimensionMismatch {
                    name: format!("{} {name}", beps_variable(variable).0),
                    expected,
                    got,
                });
            }
        }
    }

    std::fs::create_dir_all(dir).map_err(|source| IoError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(beps_file_name(record.date()));
    if path.exists() && !force {
        debug!(path = %path.display(), "file exists, skipping");
        return Ok(WriteOutcome::Skipped(path));
    }

    let mut file = netcdf::create(&path)?;
    file.add_unlimited_dimension("time")?;
    file.add_dimension("lat", ny)?;
    file.add_dimension("lon", nx)?;

    {
        let midnight = record.date().and_time(NaiveTime::default());
        let units = TimeUnits::new(TimeUnit::Hours, midnight);
        let hours: Vec<f32> = record
            .hours()
            .iter()
            .map(|&h| units.encode(midnight + TimeDelta::hours(h)) as f32)
            .collect();
        let mut var = file.add_variable::<f32>("time", &["time"])?;
        var.put_attribute("units", units.to_string())?;
        var.put_attribute("calendar", "gregorian")?;
        var.put_values(&hours, (&[0_usize], &[nt]))?;
    }
    {
        let lat: Vec<f32> = grid.lat().iter().map(|&v| v as f32).collect();
        let mut var = file.add_variable::<f32>("lat", &["lat"])?;
        var.put_attribute("units", "degrees_north")?;
        var.put_values(&lat, ..)?;
    }
    {
        let lon: Vec<f32> = grid.lon().iter().map(|&v| v as f32).collect();
        let mut var = file.add_variable::<f32>("lon", &["lon"])?;
        var.put_attribute("units", "degrees_east")?;
        var.put_values(&lon, ..)?;
    }

    let dims = ["time", "lat", "lon"];
    // Explicit counts: the unlimited `time` dimension is still empty here.
    let (origin, counts) = ([0_usize; 3], [nt, ny, nx]);
    for variable in FILE_ORDER {
        let (name, units) = beps_variable(variable);
        let field = record.get(variable);
        if variable == Variable::Precip {
            let mut var = file.add_variable::<f32>(name, &dims)?;
            var.put_attribute("units", units)?;
            var.put_values(&flatten(field, |v| v as f32), (&origin, &counts))?;
        } else {
            let mut var = file.add_variable::<f64>(name, &dims)?;
            var.put_attribute("units", units)?;
            var.put_values(&flatten(field, |v| v), (&origin, &counts))?;
        }
    }

    info!(path = %path.display(), date = %record.date(), "wrote BEPS file");
    Ok(WriteOutcome::Written(path))
}

/// Row-major copy of `field`, converted element-wise.
fn flatten<T>(field: &Array3<f64>, f: impl Fn(f64) -> T) -> Vec<T> {
    field.iter().map(|&v| f(v)).collect()
}
