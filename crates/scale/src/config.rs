//! Configuration for climatological scaling.

use std::fmt;
use std::str::FromStr;

use crate::error::ScaleError;

/// What to do with a cell whose target total cannot be divided by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Abort with [`ScaleError::DegenerateScale`].
    #[default]
    Fail,
    /// Leave the cell unscaled (factor 1.0) and log a warning.
    Unscaled,
}

impl fmt::Display for DegeneratePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => f.write_str("fail"),
            Self::Unscaled => f.write_str("unscaled"),
        }
    }
}

impl FromStr for DegeneratePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(Self::Fail),
            "unscaled" => Ok(Self::Unscaled),
            other => Err(format!(
                "unknown degenerate policy: {other:?} (expected \"fail\" or \"unscaled\")"
            )),
        }
    }
}

/// Configuration for [`compute_scale_factor`](crate::compute_scale_factor).
///
/// # Example
///
/// ```
/// use pluvia_scale::{DegeneratePolicy, ScaleConfig};
///
/// let config = ScaleConfig::new().with_policy(DegeneratePolicy::Unscaled);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConfig {
    min_target_total: f64,
    policy: DegeneratePolicy,
}

impl ScaleConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `min_target_total = 1e-9`, `policy = Fail`.
    pub fn new() -> Self {
        Self {
            min_target_total: 1e-9,
            policy: DegeneratePolicy::Fail,
        }
    }

    /// Sets the smallest usable target total; smaller magnitudes are degenerate.
    pub fn with_min_target_total(mut self, total: f64) -> Self {
        self.min_target_total = total;
        self
    }

    /// Sets the degenerate-cell policy.
    pub fn with_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the smallest usable target total.
    pub fn min_target_total(&self) -> f64 {
        self.min_target_total
    }

    /// Returns the degenerate-cell policy.
    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ScaleError> {
        if !self.min_target_total.is_finite() || self.min_target_total < 0.0 {
            return Err(ScaleError::InvalidConfig {
                reason: format!(
                    "min_target_total must be finite and non-negative, got {}",
                    self.min_target_total
                ),
            });
        }
        Ok(())
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self::new()
    }
}
