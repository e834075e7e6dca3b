//! Monitor loop: fan out one fetch per pair, fan in, apply the change rule

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};

use crate::report::{MonitorEvent, NotificationSink};
use crate::shared::config::MonitoringConfig;
use crate::shared::types::FetchOutcome;
use super::{PriceAnalyzer, PriceFeed, PriceTable, Ticker};

/// Per-tick counters, logged at debug level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub observed: usize,
    pub changed: usize,
    pub failed: usize,
}

/// Monitors ask prices of the configured pairs
pub struct PriceMonitor {
    config: MonitoringConfig,
    feed: PriceFeed,
    analyzer: PriceAnalyzer,
    sink: Arc<dyn NotificationSink>,
}

impl PriceMonitor {
    pub fn new(config: MonitoringConfig, feed: PriceFeed, sink: Arc<dyn NotificationSink>) -> Self {
        let analyzer = PriceAnalyzer::new(config.threshold_abs);
        Self {
            config,
            feed,
            analyzer,
            sink,
        }
    }

    pub fn config(&self) -> &MonitoringConfig {
        &self.config
    }

    /// Runs one poll cycle. Every pair is fetched concurrently and the table
    /// is only touched after all outcomes are in.
    pub async fn run_tick(&self, table: PriceTable) -> PriceTable {
        let fetches = self.config.pairs.iter().map(|pair| self.feed.fetch(pair));
        let outcomes = join_all(fetches).await;

        let (table, summary) = self.apply_outcomes(table, outcomes);
        debug!(
            "Tick done: {} observed, {} changed, {} failed",
            summary.observed, summary.changed, summary.failed
        );
        table
    }

    /// Applies one tick's outcomes to the table and reports them to the sink.
    pub fn apply_outcomes(
        &self,
        mut table: PriceTable,
        outcomes: Vec<FetchOutcome>,
    ) -> (PriceTable, TickSummary) {
        let mut summary = TickSummary::default();

        for outcome in outcomes {
            match outcome {
                FetchOutcome::Success(observation) => {
                    summary.observed += 1;
                    if let Some(change) = self.analyzer.apply(&mut table, &observation) {
                        summary.changed += 1;
                        self.sink.notify(&MonitorEvent::from(change));
                    }
                }
                FetchOutcome::Failure { pair, cause } => {
                    summary.failed += 1;
                    self.sink.notify(&MonitorEvent::FetchFailed {
                        pair,
                        cause: cause.to_string(),
                    });
                }
            }
        }

        (table, summary)
    }

    /// Polls on every tick until the ticker is exhausted and returns the final
    /// table. With a wall-clock ticker this only ends with the process.
    pub async fn run<T: Ticker>(&self, ticker: &mut T) -> PriceTable {
        let mut table = PriceTable::new();

        while ticker.tick().await {
            table = self.run_tick(table).await;
        }

        info!("Price monitor stopped");
        table
    }
}

impl std::fmt::Debug for PriceMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceMonitor")
            .field("config", &self.config)
            .field("feed", &self.feed)
            .finish()
    }
}
