//! Monitoring configuration and its defaults

use serde::{Deserialize, Serialize};

use crate::shared::errors::AppError;
use crate::shared::types::PairId;

pub const DEFAULT_PAIR: &str = "BTC-USD";
pub const DEFAULT_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_THRESHOLD_ABS: f64 = 0.01;

/// Margin kept between the fetch deadline and the poll interval
pub const TIMEOUT_SAFETY_MARGIN_MS: u64 = 1000;
/// Fetch deadline never goes below this
pub const MIN_FETCH_TIMEOUT_MS: u64 = 1000;

/// Immutable input of one monitor run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub pairs: Vec<PairId>,
    pub interval_ms: u64,
    pub threshold_abs: f64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            pairs: vec![PairId::new(DEFAULT_PAIR)],
            interval_ms: DEFAULT_INTERVAL_MS,
            threshold_abs: DEFAULT_THRESHOLD_ABS,
        }
    }
}

impl MonitoringConfig {
    pub fn new(pairs: Vec<PairId>, interval_ms: u64, threshold_abs: f64) -> Result<Self, AppError> {
        let config = Self {
            pairs,
            interval_ms,
            threshold_abs,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.pairs.is_empty() {
            return Err(AppError::ConfigError("at least one currency pair is required".to_string()));
        }
        if let Some(blank) = self.pairs.iter().find(|p| p.as_str().trim().is_empty()) {
            return Err(AppError::ConfigError(format!("invalid currency pair {:?}", blank.as_str())));
        }
        if self.interval_ms == 0 {
            return Err(AppError::ConfigError("interval_ms must be positive".to_string()));
        }
        if !self.threshold_abs.is_finite() || self.threshold_abs < 0.0 {
            return Err(AppError::ConfigError(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold_abs
            )));
        }
        Ok(())
    }

    /// Deadline for a single quote request: interval minus the safety margin,
    /// floored at `MIN_FETCH_TIMEOUT_MS`.
    pub fn fetch_timeout_ms(&self) -> u64 {
        if self.interval_ms > TIMEOUT_SAFETY_MARGIN_MS {
            (self.interval_ms - TIMEOUT_SAFETY_MARGIN_MS).max(MIN_FETCH_TIMEOUT_MS)
        } else {
            MIN_FETCH_TIMEOUT_MS
        }
    }

    /// Comma-joined pair list for log lines
    pub fn pairs_display(&self) -> String {
        self.pairs
            .iter()
            .map(PairId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Splits a comma-separated pair list, trimming entries and dropping blanks.
pub fn parse_pair_list(raw: &str) -> Vec<PairId> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PairId::new)
        .collect()
}
