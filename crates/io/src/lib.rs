//! # pluvia-io
//!
//! Read MSWEP/MSWX forcing and the land/sea mask from NetCDF files, and
//! write daily BEPS forcing files. Bridges external file formats into the
//! `TimeSeries` and `DailyRecord` types of the pipeline.
//!
//! Source values are read as stored. Fill values are not masked so that
//! gap filling can recognise sentinel-flagged steps.

mod error;
mod netcdf_read;
mod reader;
mod time;
mod writer;

pub use error::IoError;
pub use reader::{Grid, MaskConfig, ReaderConfig, read_land_sea_mask, read_variable};
pub use time::{TimeUnit, TimeUnits};
pub use writer::{WriteOutcome, beps_file_name, beps_variable, write_daily_record};
