//! # pluvia-scale
//!
//! Rescales one target year's wet-season precipitation so that its total
//! matches the climatological wet-season total, cell by cell.
//!
//! ```text
//!  climatology segments ─┐
//!                        ├─▶ compute_scale_factor ─▶ ScaleFactor ─▶ apply_scale
//!  target wet segment ───┘                                           (wet window only)
//! ```
//!
//! # Quick start
//!
//! ```ignore
//! use pluvia_scale::{
//!     ScaleConfig, ScaleSummary, apply_scale, compute_scale_factor, target_season,
//! };
//!
//! let (window, target) = target_season(&precip, &boundary, 2023)?;
//! let factor = compute_scale_factor(&wet_segments, &target, &ScaleConfig::new())?;
//! let scaled = apply_scale(&precip, &window, &factor)?;
//! let summary = ScaleSummary::new(2023, &window, &factor);
//! ```

mod apply;
mod config;
mod error;
mod factor;
mod summary;
mod target;

pub use apply::apply_scale;
pub use config::{DegeneratePolicy, ScaleConfig};
pub use error::ScaleError;
pub use factor::{ScaleFactor, compute_scale_factor};
pub use summary::ScaleSummary;
pub use target::target_season;
