// src/app.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, EnvOverrides};
use crate::domain::price::{IntervalTicker, PriceFeed, PriceMonitor};
use crate::exchanges::api_clients::uphold_quote_client::DEFAULT_BASE_URL;
use crate::exchanges::UpholdQuoteClient;
use crate::report::LogSink;
use crate::shared::config::{parse_pair_list, MonitoringConfig};
use crate::shared::errors::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct AppCfg {
    pub monitoring: MonitoringConfig,
    pub base_url: String,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            monitoring: MonitoringConfig::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AppCfg {
    /// Defaults overlaid with whatever the config file sets
    pub fn from_config(cfg: Config) -> Self {
        let mut app_cfg = Self::default();

        if let Some(pairs) = cfg.monitor.pairs {
            let pairs = parse_pair_list(&pairs.join(","));
            if !pairs.is_empty() {
                app_cfg.monitoring.pairs = pairs;
            }
        }
        if let Some(interval_ms) = cfg.monitor.interval_ms {
            app_cfg.monitoring.interval_ms = interval_ms;
        }
        if let Some(threshold_abs) = cfg.monitor.threshold_abs {
            app_cfg.monitoring.threshold_abs = threshold_abs;
        }
        if let Some(base_url) = cfg.quote_service.base_url {
            app_cfg.base_url = base_url;
        }

        app_cfg
    }

    pub fn apply_env(&mut self, env: EnvOverrides) {
        if let Some(pairs) = env.pairs {
            self.monitoring.pairs = pairs;
        }
        if let Some(interval_ms) = env.interval_ms {
            self.monitoring.interval_ms = interval_ms;
        }
        if let Some(threshold_abs) = env.threshold_abs {
            self.monitoring.threshold_abs = threshold_abs;
        }
        if let Some(base_url) = env.base_url {
            self.base_url = base_url;
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.monitoring.validate()?;
        if self.base_url.trim().is_empty() {
            return Err(AppError::ConfigError("quote service base URL is empty".to_string()));
        }
        Ok(())
    }

    pub fn startup_message(&self) -> String {
        format!(
            "Monitoring currency pairs: {} every {} ms, with price threshold: {}",
            self.monitoring.pairs_display(),
            self.monitoring.interval_ms,
            self.monitoring.threshold_abs
        )
    }
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    app_cfg.validate()?;

    info!("{}", app_cfg.startup_message());
    info!("Quote service: {}", app_cfg.base_url);

    let timeout_ms = app_cfg.monitoring.fetch_timeout_ms();
    let client = Arc::new(UpholdQuoteClient::new(app_cfg.base_url.clone(), timeout_ms)?);
    let feed = PriceFeed::new(client, timeout_ms);
    let monitor = PriceMonitor::new(app_cfg.monitoring.clone(), feed, Arc::new(LogSink));

    let mut ticker = IntervalTicker::from_millis(app_cfg.monitoring.interval_ms);

    tokio::select! {
        _ = monitor.run(&mut ticker) => {}
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::PairId;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let mut app_cfg = AppCfg::from_config(Config::default());
        app_cfg.apply_env(EnvOverrides::default());

        assert_eq!(app_cfg.monitoring.pairs, vec![PairId::new("BTC-USD")]);
        assert_eq!(app_cfg.monitoring.interval_ms, 5000);
        assert_eq!(app_cfg.monitoring.threshold_abs, 0.01);
        assert_eq!(app_cfg.base_url, "https://api-sandbox.uphold.com");
        assert_eq!(
            app_cfg.startup_message(),
            "Monitoring currency pairs: BTC-USD every 5000 ms, with price threshold: 0.01"
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let cfg = Config::parse(
            r#"
            [monitor]
            pairs = ["LTC-USD"]
            interval_ms = 10000
            "#,
        )
        .unwrap();
        let mut app_cfg = AppCfg::from_config(cfg);
        assert_eq!(app_cfg.monitoring.pairs, vec![PairId::new("LTC-USD")]);

        app_cfg.apply_env(EnvOverrides {
            pairs: Some(vec![
                PairId::new("BTC-USD"),
                PairId::new("ETH-USD"),
                PairId::new("XRP-USD"),
            ]),
            interval_ms: Some(6000),
            threshold_abs: Some(20.0),
            base_url: None,
        });

        assert_eq!(
            app_cfg.startup_message(),
            "Monitoring currency pairs: BTC-USD, ETH-USD, XRP-USD every 6000 ms, with price threshold: 20"
        );
        assert!(app_cfg.validate().is_ok());
    }

    #[test]
    fn test_empty_pair_list_in_file_keeps_default() {
        let cfg = Config::parse("[monitor]\npairs = []\n").unwrap();
        let app_cfg = AppCfg::from_config(cfg);
        assert_eq!(app_cfg.monitoring.pairs, vec![PairId::new("BTC-USD")]);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut app_cfg = AppCfg::default();
        app_cfg.base_url = " ".to_string();
        assert!(app_cfg.validate().is_err());

        let mut app_cfg = AppCfg::default();
        app_cfg.monitoring.interval_ms = 0;
        assert!(app_cfg.validate().is_err());
    }
}
