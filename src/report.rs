// src/report.rs
//! Notification sink for monitor events

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info};

use crate::shared::types::{PairId, PriceChange};

/// Events produced by the monitor loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MonitorEvent {
    PriceChanged {
        pair: PairId,
        previous: f64,
        current: f64,
        delta: f64,
    },
    FetchFailed {
        pair: PairId,
        cause: String,
    },
}

impl MonitorEvent {
    pub fn pair(&self) -> &PairId {
        match self {
            MonitorEvent::PriceChanged { pair, .. } => pair,
            MonitorEvent::FetchFailed { pair, .. } => pair,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, MonitorEvent::FetchFailed { .. })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<PriceChange> for MonitorEvent {
    fn from(change: PriceChange) -> Self {
        MonitorEvent::PriceChanged {
            pair: change.pair,
            previous: change.previous,
            current: change.current,
            delta: change.delta,
        }
    }
}

impl fmt::Display for MonitorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorEvent::PriceChanged {
                pair,
                previous,
                current,
                delta,
            } => write!(
                f,
                "Price change detected for {}: {} => {} (Change: {})",
                pair, previous, current, delta
            ),
            MonitorEvent::FetchFailed { pair, cause } => {
                write!(f, "Error fetching data for {}: {}", pair, cause)
            }
        }
    }
}

/// Where monitor events go. Implementations must not block.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, event: &MonitorEvent);
}

/// Renders events as single log lines: changes at INFO, failures at ERROR
#[derive(Debug, Default, Clone)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, event: &MonitorEvent) {
        match event {
            MonitorEvent::PriceChanged { pair, delta, .. } => {
                info!(pair = %pair, delta = *delta, "{}", event);
            }
            MonitorEvent::FetchFailed { pair, .. } => {
                error!(pair = %pair, "{}", event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_changed_line() {
        let event = MonitorEvent::from(PriceChange {
            pair: PairId::new("BTC-USD"),
            previous: 50000.0,
            current: 50000.5,
            delta: 0.5,
        });
        assert_eq!(
            event.to_string(),
            "Price change detected for BTC-USD: 50000 => 50000.5 (Change: 0.5)"
        );
        assert!(!event.is_failure());
    }

    #[test]
    fn test_fetch_failed_line() {
        let event = MonitorEvent::FetchFailed {
            pair: PairId::new("ETH-USD"),
            cause: "Request timed out after 4000 ms".to_string(),
        };
        assert_eq!(
            event.to_string(),
            "Error fetching data for ETH-USD: Request timed out after 4000 ms"
        );
        assert!(event.is_failure());
        assert_eq!(event.pair().as_str(), "ETH-USD");
    }

    #[test]
    fn test_event_kinds_are_distinguishable_in_json() {
        let failed = MonitorEvent::FetchFailed {
            pair: PairId::new("ETH-USD"),
            cause: "boom".to_string(),
        };
        let json = failed.to_json().unwrap();
        assert!(json.contains(r#""kind":"FetchFailed""#));
        assert!(json.contains(r#""pair":"ETH-USD""#));
    }
}
