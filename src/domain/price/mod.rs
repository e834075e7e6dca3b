//! Price domain - quote fetching, change detection and the monitor loop

mod price_analyzer;
mod price_feed;
mod price_monitor;
mod price_table;
mod ticker;

pub use price_analyzer::PriceAnalyzer;
pub use price_feed::PriceFeed;
pub use price_monitor::{PriceMonitor, TickSummary};
pub use price_table::PriceTable;
pub use ticker::{IntervalTicker, Ticker};
