//! High-level NetCDF readers for forcing variables and the land/sea mask.

use std::path::Path;

use ndarray::{Array2, Array3};
use pluvia_timeseries::{LandMask, TimeSeries};
use tracing::info;

use crate::error::IoError;
use crate::netcdf_read;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading gridded forcing from NetCDF files.
///
/// The [`Default`] implementation supplies the coordinate names used by
/// MSWEP and MSWX.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// NetCDF variable name for the time axis.
    time_var: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            lon_aliases: vec!["lon".into(), "longitude".into(), "x".into()],
            lat_aliases: vec!["lat".into(), "latitude".into(), "y".into()],
            time_var: "time".into(),
        }
    }
}

impl ReaderConfig {
    /// Set the longitude aliases, tried in order.
    pub fn with_lon_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lon_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Set the latitude aliases, tried in order.
    pub fn with_lat_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lat_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Returns the time variable name.
    pub fn time_var(&self) -> &str {
        &self.time_var
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidConfig`] if an alias list or the time
    /// variable name is empty.
    pub fn validate(&self) -> Result<(), IoError> {
        if self.lon_aliases.is_empty() || self.lat_aliases.is_empty() {
            return Err(IoError::InvalidConfig {
                reason: "coordinate alias lists must not be empty".to_string(),
            });
        }
        if self.time_var.is_empty() {
            return Err(IoError::InvalidConfig {
                reason: "time variable name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Latitude and longitude coordinates of a regular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    lat: Vec<f64>,
    lon: Vec<f64>,
}

impl Grid {
    /// Creates a grid from its coordinate vectors.
    pub fn new(lat: Vec<f64>, lon: Vec<f64>) -> Self {
        Self { lat, lon }
    }

    /// Returns the latitudes in degrees north.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Returns the longitudes in degrees east.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// Returns `(lat, lon)` lengths.
    pub fn shape(&self) -> (usize, usize) {
        (self.lat.len(), self.lon.len())
    }
}

// ---------------------------------------------------------------------------
// read_variable
// ---------------------------------------------------------------------------

/// Read one `[time, lat, lon]` variable and its coordinates.
///
/// Values are returned as stored: fill values are not masked, so that
/// sentinel-flagged steps remain detectable by gap filling.
///
/// # Errors
///
/// Returns [`IoError`] on missing files or variables, a variable that is not
/// 3-D, coordinates whose lengths disagree with the variable, or an
/// undecodable time axis.
pub fn read_variable(
    path: &Path,
    name: &str,
    config: &ReaderConfig,
) -> Result<(TimeSeries, Grid), IoError> {
    config.validate()?;
    let file = netcdf_read::open_file(path)?;

    let lon = netcdf_read::read_1d_f64(&file, &config.lon_aliases, path)?;
    let lat = netcdf_read::read_1d_f64(&file, &config.lat_aliases, path)?;
    let times = netcdf_read::read_time(&file, &config.time_var, path)?;
    let (data, [nt, ny, nx]) = netcdf_read::read_3d_f64(&file, name, path)?;

    let lengths = [
        ("time", nt, times.len()),
        ("lat", ny, lat.len()),
        ("lon", nx, lon.len()),
    ];
    for (dim, expected, got) in lengths {
        if expected != got {
            return Err(IoError::DimensionMismatch {
                name: dim.to_string(),
                expected,
                got,
            });
        }
    }

    let values = Array3::from_shape_vec((nt, ny, nx), data).map_err(|e| IoError::Netcdf {
        reason: format!("{name}: {e}"),
    })?;
    let series = TimeSeries::new(times, values)?;
    info!(
        path = %path.display(),
        variable = name,
        steps = nt,
        lat = ny,
        lon = nx,
        "read variable"
    );
    Ok((series, Grid::new(lat, lon)))
}

// ---------------------------------------------------------------------------
// Land/sea mask
// ---------------------------------------------------------------------------

/// Configuration for reading a water-percentage land/sea mask.
#[derive(Debug, Clone)]
pub struct MaskConfig {
    /// Mask variable name.
    var: String,
    /// Water percentage above which a cell is ocean.
    ocean_threshold: f64,
    /// Reverse the latitude axis after reading.
    flip_lat: bool,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            var: "landseamask".into(),
            ocean_threshold: 50.0,
            flip_lat: true,
        }
    }
}

impl MaskConfig {
    /// Set the mask variable name.
    pub fn with_var(mut self, name: impl Into<String>) -> Self {
        self.var = name.into();
        self
    }

    /// Set the ocean threshold in percent.
    pub fn with_ocean_threshold(mut self, threshold: f64) -> Self {
        self.ocean_threshold = threshold;
        self
    }

    /// Enable or disable latitude flipping.
    pub fn with_flip_lat(mut self, flip: bool) -> Self {
        self.flip_lat = flip;
        self
    }

    /// Returns the mask variable name.
    pub fn var(&self) -> &str {
        &self.var
    }

    /// Returns the ocean threshold in percent.
    pub fn ocean_threshold(&self) -> f64 {
        self.ocean_threshold
    }

    /// Returns `true` if the latitude axis is reversed after reading.
    pub fn flip_lat(&self) -> bool {
        self.flip_lat
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidConfig`] if the threshold is outside
    /// `0..=100`.
    pub fn validate(&self) -> Result<(), IoError> {
        if !(0.0..=100.0).contains(&self.ocean_threshold) {
            return Err(IoError::InvalidConfig {
                reason: format!(
                    "ocean_threshold must be within 0..=100, got {}",
                    self.ocean_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Read a land/sea mask stored as water percentage.
///
/// The variable may be `[lat, lon]` or `[1, lat, lon]`.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] for any other layout, and the
/// usual file and variable errors.
pub fn read_land_sea_mask(path: &Path, config: &MaskConfig) -> Result<LandMask, IoError> {
    config.validate()?;
    let file = netcdf_read::open_file(path)?;
    let (data, dims) = netcdf_read::read_nd_f64(&file, &config.var, path)?;
    let (ny, nx) = match dims[..] {
        [ny, nx] | [1, ny, nx] => (ny, nx),
        _ => {
            return Err(IoError::DimensionMismatch {
                name: format!("{} dimensions", config.var),
                expected: 2,
                got: dims.len(),
            });
        }
    };

    let water = Array2::from_shape_vec((ny, nx), data).map_err(|e| IoError::Netcdf {
        reason: format!("{}: {e}", config.var),
    })?;
    let mask = LandMask::from_water_fraction(water.view(), config.ocean_threshold);
    let mask = if config.flip_lat {
        mask.flipped_lat()
    } else {
        mask
    };
    info!(
        path = %path.display(),
        ocean_cells = mask.n_ocean(),
        "read land/sea mask"
    );
    Ok(mask)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
