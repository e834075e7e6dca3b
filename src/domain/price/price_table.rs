//! Last qualifying ask price per pair

use std::collections::HashMap;

use crate::shared::types::PairId;

/// State carried between ticks. Absent entries read as 0.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    prices: HashMap<PairId, f64>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pair: &PairId) -> Option<f64> {
        self.prices.get(pair).copied()
    }

    /// Baseline for the change rule
    pub fn get_or_zero(&self, pair: &PairId) -> f64 {
        self.get(pair).unwrap_or(0.0)
    }

    pub fn record(&mut self, pair: PairId, ask: f64) {
        self.prices.insert(pair, ask);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
