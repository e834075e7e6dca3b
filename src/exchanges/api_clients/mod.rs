pub mod uphold_quote_client;

pub use uphold_quote_client::UpholdQuoteClient;

use async_trait::async_trait;

use crate::shared::errors::QuoteError;
use crate::shared::types::PairId;

/// Base trait for quote service clients
#[async_trait]
pub trait QuoteApiClient: Send + Sync {
    /// Fetch the current ask price for a pair. One request, no retries.
    async fn get_ask(&self, pair: &PairId) -> Result<f64, QuoteError>;

    /// Name of the service, used in log lines
    fn name(&self) -> &str;
}
