//! Common types used across the application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::QuoteError;

/// Currency pair identifier as understood by the quote service (e.g. `BTC-USD`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(String);

impl PairId {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PairId {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

impl From<String> for PairId {
    fn from(symbol: String) -> Self {
        Self(symbol)
    }
}

/// A single successful ask-price read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub pair: PairId,
    pub ask: f64,
    pub observed_at: DateTime<Utc>,
}

impl PriceObservation {
    pub fn new(pair: PairId, ask: f64) -> Self {
        Self {
            pair,
            ask,
            observed_at: Utc::now(),
        }
    }
}

/// Result of one fetch for one pair. Exactly one is produced per pair per tick.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(PriceObservation),
    Failure { pair: PairId, cause: QuoteError },
}

impl FetchOutcome {
    pub fn pair(&self) -> &PairId {
        match self {
            FetchOutcome::Success(observation) => &observation.pair,
            FetchOutcome::Failure { pair, .. } => pair,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }
}

/// A price move that exceeded the configured threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub pair: PairId,
    pub previous: f64,
    pub current: f64,
    pub delta: f64,
}
