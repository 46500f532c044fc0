//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::NaiveDateTime;
use netcdf::AttributeValue;
use tracing::debug;

use crate::error::IoError;
use crate::time::{TimeUnits, check_calendar};

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

fn variable<'f>(
    file: &'f netcdf::File,
    name: &str,
    path: &Path,
) -> Result<netcdf::Variable<'f>, IoError> {
    file.variable(name).ok_or_else(|| IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[String],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().map(String::as_str).unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read an `f64` variable and return the flattened data together with the
/// lengths of its dimensions.
pub(crate) fn read_nd_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, Vec<usize>), IoError> {
    let var = variable(file, var_name, path)?;
    let dims = var.dimensions().iter().map(|d| d.len()).collect();
    let data = var.get_values::<f64, _>(..)?;
    Ok((data, dims))
}

/// Read a 3-D `f64` variable and return the flattened data together with
/// the shape `[nt, ny, nx]` derived from the variable's dimensions.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, [usize; 3]), IoError> {
    let (data, dims) = read_nd_f64(file, var_name, path)?;
    match dims[..] {
        [nt, ny, nx] => Ok((data, [nt, ny, nx])),
        _ => Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: 3,
            got: dims.len(),
        }),
    }
}

/// Read a string attribute of a variable, if present.
fn string_attribute(var: &netcdf::Variable<'_>, name: &str) -> Result<Option<String>, IoError> {
    match var.attribute_value(name) {
        None => Ok(None),
        Some(value) => match value? {
            AttributeValue::Str(s) => Ok(Some(s)),
            other => Err(IoError::InvalidTime {
                reason: format!("'{name}' attribute is not a string: {other:?}"),
            }),
        },
    }
}

/// Read and decode a CF time coordinate.
///
/// The `units` attribute is required; a `calendar` attribute, when present,
/// must be one of the Gregorian calendars.
pub(crate) fn read_time(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<Vec<NaiveDateTime>, IoError> {
    let var = variable(file, time_var, path)?;
    let units: TimeUnits = string_attribute(&var, "units")?
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .parse()?;
    check_calendar(string_attribute(&var, "calendar")?.as_deref())?;

    let offsets = var.get_values::<f64, _>(..)?;
    debug!(
        unit = %units.unit(),
        epoch = %units.epoch(),
        steps = offsets.len(),
        "decoding time axis"
    );
    units.decode(&offsets)
}
