//! # pluvia-calendar
//!
//! Calendar helpers shared by the pipeline stages: leap-day detection,
//! year-independent markers and timestamp sequences.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDateTime"] -->|"YearMarker::from_datetime()"| B["YearMarker (month, day, hour)"]
//!     B -->|".in_year(y)"| A
//!     B -->|".day_of_year()"| C["1..=365"]
//!     A -->|"is_leap_day()"| D["bool"]
//!     E["start, end, step"] -->|"step_sequence()"| F["Vec of NaiveDateTime"]
//!     F -->|"unique_days()"| G["Vec of NaiveDate"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use pluvia_calendar::{YearMarker, is_leap_day, REFERENCE_YEAR};
//!
//! let marker = YearMarker::new(5, 30, 12).unwrap();
//! let t = marker.in_year(2023); // 2023-05-30 12:00
//! assert_eq!(marker.day_of_year(), 150);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `leap` | Leap-day predicate |
//! | `marker` | Year-independent `(month, day, hour)` markers |
//! | `sequence` | Regular timestamp sequences and distinct calendar days |
//! | `error` | Error types |

mod error;
mod leap;
mod marker;
mod sequence;

pub use error::CalendarError;
pub use leap::is_leap_day;
pub use marker::YearMarker;
pub use sequence::{step_sequence, unique_days};

/// Non-leap year on which year-independent offsets are defined.
pub const REFERENCE_YEAR: i32 = 1901;

/// Number of days in a non-leap year.
pub const DAYS_PER_YEAR: u16 = 365;
