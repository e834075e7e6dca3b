use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ticker_watch::app::{self, AppCfg};
use ticker_watch::config::{Config, EnvOverrides};
use ticker_watch::shared::config::parse_pair_list;

#[derive(Parser, Debug)]
#[command(version, about = "Watches currency pair ask prices and reports threshold moves")]
struct Args {
    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// Currency pairs to monitor (comma-separated, e.g. BTC-USD,ETH-USD)
    #[arg(long)]
    pairs: Option<String>,

    /// Poll interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Absolute ask-price change that triggers a notification
    #[arg(long)]
    threshold: Option<f64>,

    /// Quote service base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();

    // Priority: CLI args > environment > config file > defaults
    let base_config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::default(),
    };
    let mut app_cfg = AppCfg::from_config(base_config);
    app_cfg.apply_env(EnvOverrides::from_env()?);

    if let Some(pairs) = args.pairs {
        let pairs = parse_pair_list(&pairs);
        if !pairs.is_empty() {
            app_cfg.monitoring.pairs = pairs;
        }
    }
    if let Some(interval_ms) = args.interval_ms {
        app_cfg.monitoring.interval_ms = interval_ms;
    }
    if let Some(threshold) = args.threshold {
        app_cfg.monitoring.threshold_abs = threshold;
    }
    if let Some(base_url) = args.base_url {
        app_cfg.base_url = base_url;
    }

    app::run(app_cfg).await
}
