//! Price change rule

use crate::shared::types::{PriceChange, PriceObservation};
use super::PriceTable;

/// Rounding slack, in ulps of the larger operand, allowed when comparing a
/// delta with the threshold. Keeps `50000.01 - 50000.00` from counting as a
/// move of more than 0.01.
const ROUNDING_ULPS: f64 = 4.0;

/// Applies the absolute-threshold change rule against the price table
#[derive(Debug, Clone, Copy)]
pub struct PriceAnalyzer {
    threshold_abs: f64,
}

impl PriceAnalyzer {
    pub fn new(threshold_abs: f64) -> Self {
        Self { threshold_abs }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold_abs
    }

    /// Strict `>`: a move equal to the threshold is not a change. Equality is
    /// judged up to the rounding error of the subtraction.
    pub fn is_significant_change(&self, previous: f64, current: f64) -> bool {
        let delta = current - previous;
        let tolerance = ROUNDING_ULPS * f64::EPSILON * previous.abs().max(current.abs());
        delta.abs() - self.threshold_abs > tolerance
    }

    /// Compares an observation with the table baseline and records it when the
    /// move is significant. Below-threshold reads leave the baseline alone.
    pub fn apply(&self, table: &mut PriceTable, observation: &PriceObservation) -> Option<PriceChange> {
        let previous = table.get_or_zero(&observation.pair);
        if !self.is_significant_change(previous, observation.ask) {
            return None;
        }

        table.record(observation.pair.clone(), observation.ask);
        Some(PriceChange {
            pair: observation.pair.clone(),
            previous,
            current: observation.ask,
            delta: observation.ask - previous,
        })
    }
}
