//! Minimum coverage check.

use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Anything that can report a coverage percentage.
pub trait CoverageSource {
    fn coverage_percent(&self) -> f64;
}

impl CoverageSource for f64 {
    fn coverage_percent(&self) -> f64 {
        *self
    }
}

/// Check a coverage percentage against an acceptable threshold such as `"75%"`.
///
/// An empty threshold always passes. The threshold must parse as a float
/// once a trailing `%` is removed.
pub fn check_acceptable(acceptable: &str, actual: f64) -> Result<()> {
    if acceptable.is_empty() {
        return Ok(());
    }

    let trimmed = acceptable.trim();
    let required = trimmed
        .strip_suffix('%')
        .unwrap_or(trimmed)
        .parse::<f64>()
        .map_err(|e| ConfigError::InvalidThreshold {
            value: acceptable.to_string(),
            source: e,
        })?;

    if actual < required {
        return Err(ConfigError::BelowThreshold { actual, required });
    }
    Ok(())
}

impl Config {
    /// Check a report against `coverage.acceptable`.
    pub fn acceptable(&self, report: &impl CoverageSource) -> Result<()> {
        let acceptable = self.coverage.acceptable.as_deref().unwrap_or_default();
        check_acceptable(acceptable, report.coverage_percent())
    }
}
