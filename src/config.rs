use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::shared::config::parse_pair_list;
use crate::shared::errors::AppError;
use crate::shared::types::PairId;

pub const ENV_CURRENCY_PAIRS: &str = "CURRENCY_PAIRS";
pub const ENV_CHECK_INTERVAL_MS: &str = "CHECK_INTERVAL_MS";
pub const ENV_PRICE_THRESHOLD: &str = "PRICE_THRESHOLD";
pub const ENV_QUOTE_BASE_URL: &str = "QUOTE_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorCfg {
    pub pairs: Option<Vec<String>>,
    pub interval_ms: Option<u64>,
    pub threshold_abs: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteServiceCfg {
    pub base_url: Option<String>,
}

/// Contents of the optional TOML config file. Every key may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorCfg,
    #[serde(default)]
    pub quote_service: QuoteServiceCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read config file {}", path.as_ref().display()))?;
        let cfg = Self::parse(&s).context("parse config file")?;
        Ok(cfg)
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(s)?)
    }
}

/// Settings taken from environment variables. Blank values count as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub pairs: Option<Vec<PairId>>,
    pub interval_ms: Option<u64>,
    pub threshold_abs: Option<f64>,
    pub base_url: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let pairs = value(ENV_CURRENCY_PAIRS)
            .map(|raw| parse_pair_list(&raw))
            .filter(|pairs| !pairs.is_empty());

        let interval_ms = value(ENV_CHECK_INTERVAL_MS)
            .map(|raw| {
                raw.parse::<u64>().map_err(|_| {
                    AppError::ConfigError(format!("{} must be a positive integer, got {:?}", ENV_CHECK_INTERVAL_MS, raw))
                })
            })
            .transpose()?;

        let threshold_abs = value(ENV_PRICE_THRESHOLD)
            .map(|raw| {
                raw.parse::<f64>().map_err(|_| {
                    AppError::ConfigError(format!("{} must be a number, got {:?}", ENV_PRICE_THRESHOLD, raw))
                })
            })
            .transpose()?;

        Ok(Self {
            pairs,
            interval_ms,
            threshold_abs,
            base_url: value(ENV_QUOTE_BASE_URL),
        })
    }
}
