//! # pluvia-timeseries
//!
//! Gridded `[time, lat, lon]` series paired with their timestamps, and the
//! first pipeline stages that operate on them: gap filling of invalid
//! precipitation steps, time-range selection, leap-day removal, and
//! land/sea masking.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//!  │ fill_invalid │────▶│    select    │────▶│ remove_leap_days │
//!  │ (sentinels)  │     │ (date range) │     │   (drop Feb 29)  │
//!  └──────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use pluvia_timeseries::{
//!     DEFAULT_SENTINEL, EndBound, TimeSeries, fill_invalid, remove_leap_days, select,
//! };
//!
//! let series = TimeSeries::new(times, values)?;
//! let filled = fill_invalid(&series, DEFAULT_SENTINEL)?;
//! let selected = select(filled.series(), start, end, EndBound::Inclusive);
//! let noleap = remove_leap_days(&selected);
//! ```

mod error;
mod gap_fill;
mod mask;
mod select;
mod series;
mod variable;

pub use error::TimeSeriesError;
pub use gap_fill::{DEFAULT_SENTINEL, GapFill, fill_invalid};
pub use mask::{LandMask, mask_ocean, spatial_mean};
pub use select::{EndBound, remove_leap_days, select};
pub use series::TimeSeries;
pub use variable::Variable;
