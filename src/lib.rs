//! Ticker Watch - currency pair ask-price monitor
//!
//! Polls a quote service for every configured pair on a fixed interval and
//! reports moves larger than an absolute threshold.

pub mod app;
pub mod config;
pub mod domain;
pub mod exchanges;
pub mod report;
pub mod shared;

// Re-export main types for convenience
pub use domain::price::{PriceFeed, PriceMonitor, PriceTable};
pub use exchanges::{QuoteApiClient, UpholdQuoteClient};
pub use report::{LogSink, MonitorEvent, NotificationSink};
pub use shared::config::MonitoringConfig;
