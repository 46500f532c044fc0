//! Configuration for window aggregation and dry-season detection.

use pluvia_calendar::DAYS_PER_YEAR;

use crate::error::SeasonError;

/// Configuration for season detection.
///
/// # Example
///
/// ```
/// use pluvia_seasons::SeasonConfig;
///
/// let config = SeasonConfig::new()
///     .with_window_days(15)
///     .with_threshold(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonConfig {
    window_days: u16,
    threshold: f64,
}

impl SeasonConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `window_days = 10`, `threshold = 0.02` (mm per 3 hours).
    pub fn new() -> Self {
        Self {
            window_days: 10,
            threshold: 0.02,
        }
    }

    /// Sets the averaging window length in days.
    pub fn with_window_days(mut self, days: u16) -> Self {
        self.window_days = days;
        self
    }

    /// Sets the dry threshold on the window-mean median.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns the averaging window length in days.
    pub fn window_days(&self) -> u16 {
        self.window_days
    }

    /// Returns the dry threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SeasonError> {
        validate_window_days(self.window_days)?;
        if !self.threshold.is_finite() {
            return Err(SeasonError::InvalidConfig {
                reason: format!("threshold must be finite, got {}", self.threshold),
            });
        }
        Ok(())
    }
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_window_days(days: u16) -> Result<(), SeasonError> {
    if !(1..=DAYS_PER_YEAR).contains(&days) {
        return Err(SeasonError::InvalidConfig {
            reason: format!("window_days must be in 1..={DAYS_PER_YEAR}, got {days}"),
        });
    }
    Ok(())
}
