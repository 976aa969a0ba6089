//! Detection settings supplied by the caller on every evaluation

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const WINDOW_DAYS_RANGE: RangeInclusive<u32> = 14..=120;
pub const SENSITIVITY_RANGE: RangeInclusive<f64> = 2.5..=6.0;
pub const MIN_HISTORY_RANGE: RangeInclusive<usize> = 3..=12;

/// Knobs for the outlier pass
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    /// Trailing window, in days, that counts as "recent"
    pub window_days: u32,
    /// Robust z-score threshold; higher means fewer alerts
    pub sensitivity: f64,
    /// Same-category entries required before an expense is scored
    pub min_history: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            window_days: 45,
            sensitivity: 3.5,
            min_history: 5,
        }
    }
}

impl DetectionConfig {
    /// Build a config, rejecting out-of-range values
    pub fn new(window_days: u32, sensitivity: f64, min_history: usize) -> Result<Self> {
        let cfg = Self {
            window_days,
            sensitivity,
            min_history,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Fail fast on values the detector does not accept
    pub fn validate(&self) -> Result<()> {
        if !WINDOW_DAYS_RANGE.contains(&self.window_days) {
            bail!(
                "window_days must be within {}..={}, got {}",
                WINDOW_DAYS_RANGE.start(),
                WINDOW_DAYS_RANGE.end(),
                self.window_days
            );
        }
        if !SENSITIVITY_RANGE.contains(&self.sensitivity) {
            bail!(
                "sensitivity must be within {}..={}, got {}",
                SENSITIVITY_RANGE.start(),
                SENSITIVITY_RANGE.end(),
                self.sensitivity
            );
        }
        if !MIN_HISTORY_RANGE.contains(&self.min_history) {
            bail!(
                "min_history must be within {}..={}, got {}",
                MIN_HISTORY_RANGE.start(),
                MIN_HISTORY_RANGE.end(),
                self.min_history
            );
        }
        Ok(())
    }

    /// Pull every field into its valid range (slider-style input).
    /// A NaN sensitivity falls back to the default.
    pub fn clamped(self) -> Self {
        let sensitivity = if self.sensitivity.is_nan() {
            Self::default().sensitivity
        } else {
            self.sensitivity
                .clamp(*SENSITIVITY_RANGE.start(), *SENSITIVITY_RANGE.end())
        };
        Self {
            window_days: self
                .window_days
                .clamp(*WINDOW_DAYS_RANGE.start(), *WINDOW_DAYS_RANGE.end()),
            sensitivity,
            min_history: self
                .min_history
                .clamp(*MIN_HISTORY_RANGE.start(), *MIN_HISTORY_RANGE.end()),
        }
    }
}
