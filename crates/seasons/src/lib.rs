//! # pluvia-seasons
//!
//! Climatological dry/wet season analysis of gridded precipitation.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["window_days"] -->|"build_windows()"| B["Vec of AveragingWindow"]
//!     C["TimeSeries (masked)"] --> D["aggregate()"]
//!     B --> D
//!     D --> E["WindowMeans [year, window]"]
//!     E -->|"detect_dry_season()"| F["SeasonBoundary"]
//!     G["TimeSeries"] --> H["extract()"]
//!     F --> H
//!     H --> I["SeasonSegments (year -> TimeSeries)"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use pluvia_seasons::{
//!     SeasonConfig, SeasonKind, aggregate, build_windows, detect_dry_season, extract,
//!     seasonal_years,
//! };
//!
//! let config = SeasonConfig::new();
//! let windows = build_windows(config.window_days())?;
//! let means = aggregate(&masked, &windows);
//! let boundary = detect_dry_season(&means, config.threshold())?;
//! let years = seasonal_years(&precip, &boundary);
//! let wet = extract(&precip, &years, &boundary, SeasonKind::Wet);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `window` | Partition of the year into fixed-length windows |
//! | `aggregate` | Per-year, per-window NaN-aware means |
//! | `detect` | Median-threshold dry-season detection |
//! | `boundary` | Season markers and per-year windows |
//! | `extract` | Per-year dry/wet segments |
//! | `config` | Window length and threshold |
//! | `error` | Error types |

mod aggregate;
mod boundary;
mod config;
mod detect;
mod error;
mod extract;
mod window;

pub use aggregate::{WindowMeans, aggregate};
pub use boundary::{SeasonBoundary, SeasonWindow};
pub use config::SeasonConfig;
pub use detect::{MIN_YEARS, detect_dry_season};
pub use error::SeasonError;
pub use extract::{SeasonKind, SeasonSegments, extract, seasonal_years};
pub use window::{AveragingWindow, build_windows};
