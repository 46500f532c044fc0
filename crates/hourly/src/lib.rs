//! # pluvia-hourly
//!
//! Temporal disaggregation of three-hourly forcing to hourly resolution and
//! assembly of daily BEPS records.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["ForcingSet (3-hourly)"] -->|"experiment_days()"| B["Vec of NaiveDate"]
//!     A --> C["daily_record(day)"]
//!     B --> C
//!     C -->|"T, RH, SSRD, WS"| D["interpolate_linear()"]
//!     C -->|"PRCP"| E["interpolate_precip()"]
//!     D --> F["DailyRecord [24, lat, lon]"]
//!     E --> F
//! ```
//!
//! Interpolation runs per grid cell; cells are independent and processed in
//! parallel with rayon.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pluvia_hourly::{ExperimentPeriod, ForcingSet, daily_record, experiment_days};
//!
//! let forcing = ForcingSet::new(precip, temp, rh, swd, wind)?;
//! let period = ExperimentPeriod::new(start, end)?;
//! for day in experiment_days(&forcing, &period)? {
//!     let record = daily_record(&forcing, day)?;
//!     // write record
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `interp` | Piecewise-linear interpolation along time |
//! | `precip` | Mass-conserving precipitation disaggregation |
//! | `daily` | Daily record assembly and unit conversion |
//! | `error` | Error types |

mod daily;
mod error;
mod interp;
mod precip;

pub use daily::{
    CELSIUS_TO_KELVIN, DailyRecord, ExperimentPeriod, ForcingSet, OUTPUT_HOURS,
    build_daily_records, daily_record, experiment_days,
};
pub use error::HourlyError;
pub use interp::interpolate_linear;
pub use precip::interpolate_precip;
