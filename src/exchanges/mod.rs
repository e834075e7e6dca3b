//! Remote quote service integrations

pub mod api_clients;

pub use api_clients::{QuoteApiClient, UpholdQuoteClient};
