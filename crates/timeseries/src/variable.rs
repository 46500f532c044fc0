//! Forcing variables handled by the pipeline.

use std::fmt;
use std::str::FromStr;

/// One of the five meteorological variables prepared for BEPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    /// Precipitation (MSWEP), mm per 3 hours.
    Precip,
    /// Air temperature (MSWX), degrees Celsius.
    Temp,
    /// Relative humidity (MSWX), percent.
    RelHum,
    /// Downward shortwave radiation (MSWX), W/m2.
    Shortwave,
    /// Wind speed (MSWX), m/s.
    Wind,
}

impl Variable {
    /// All variables, in output order.
    pub const ALL: [Variable; 5] = [
        Variable::Temp,
        Variable::Precip,
        Variable::RelHum,
        Variable::Shortwave,
        Variable::Wind,
    ];

    /// Short name used in configuration files and logs.
    pub fn key(self) -> &'static str {
        match self {
            Self::Precip => "precip",
            Self::Temp => "temp",
            Self::RelHum => "rh",
            Self::Shortwave => "swd",
            Self::Wind => "wind",
        }
    }

    /// Variable name inside the source NetCDF files.
    pub fn source_name(self) -> &'static str {
        match self {
            Self::Precip => "precipitation",
            Self::Temp => "air_temperature",
            Self::RelHum => "relative_humidity",
            Self::Shortwave => "downward_shortwave_radiation",
            Self::Wind => "wind_speed",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Variable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variable::ALL
            .into_iter()
            .find(|v| v.key() == s)
            .ok_or_else(|| format!("unknown variable: {s:?}"))
    }
}
