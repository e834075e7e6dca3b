//! Quote fetcher: one deadline-bounded request per pair

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::exchanges::api_clients::QuoteApiClient;
use crate::shared::errors::QuoteError;
use crate::shared::types::{FetchOutcome, PairId, PriceObservation};

/// Wraps a quote client and turns every request into a `FetchOutcome`.
/// Never retries; a failed pair waits for the next tick.
#[derive(Clone)]
pub struct PriceFeed {
    client: Arc<dyn QuoteApiClient>,
    timeout: Duration,
}

impl PriceFeed {
    pub fn new(client: Arc<dyn QuoteApiClient>, timeout_ms: u64) -> Self {
        Self {
            client,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn fetch(&self, pair: &PairId) -> FetchOutcome {
        let result = match tokio::time::timeout(self.timeout, self.client.get_ask(pair)).await {
            Ok(result) => result,
            Err(_) => Err(QuoteError::Timeout(self.timeout.as_millis() as u64)),
        };

        match result {
            Ok(ask) => {
                debug!("{} ask for {}: {}", self.client.name(), pair, ask);
                FetchOutcome::Success(PriceObservation::new(pair.clone(), ask))
            }
            Err(cause) => FetchOutcome::Failure {
                pair: pair.clone(),
                cause,
            },
        }
    }
}

impl std::fmt::Debug for PriceFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceFeed")
            .field("client", &self.client.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}
