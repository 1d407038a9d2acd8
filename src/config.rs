use std::env;

use crate::api::coinapi::CoinApiClient;
use crate::error::TrackerError;

/// How the registry's price series are populated at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Random sample prices only
    Sample,
    /// Sample prices, then one refresh pass against CoinAPI
    CoinApi,
}

impl DataSource {
    fn parse(value: &str) -> Result<Self, TrackerError> {
        match value.trim().to_lowercase().as_str() {
            "sample" => Ok(Self::Sample),
            "coinapi" => Ok(Self::CoinApi),
            other => Err(TrackerError::Config(format!(
                "unknown TRACKER_DATA_SOURCE '{}', expected 'sample' or 'coinapi'",
                other
            ))),
        }
    }
}

/// Longest accepted price history, in days
pub const MAX_LOOKBACK_DAYS: usize = 3650;

/// Tracker configuration derived from environment variables.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub bind: String,
    pub port: u16,
    pub data_source: DataSource,
    /// Required when `data_source` is `CoinApi`
    pub coinapi_key: Option<String>,
    pub coinapi_base_url: String,
    /// Days of price history per asset
    pub lookback_days: usize,
}

/// Reads a variable, treating blank values as unset
fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_str(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T, TrackerError> {
    match env_opt(name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| TrackerError::Config(format!("invalid value for {}: '{}'", name, raw))),
        None => Ok(default),
    }
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self, TrackerError> {
        let data_source = DataSource::parse(&env_str("TRACKER_DATA_SOURCE", "sample"))?;
        let coinapi_key = env_opt("COINAPI_KEY");

        if data_source == DataSource::CoinApi && coinapi_key.is_none() {
            return Err(TrackerError::Config(
                "COINAPI_KEY must be set when TRACKER_DATA_SOURCE=coinapi".to_string(),
            ));
        }

        let lookback_days = env_parse("TRACKER_LOOKBACK_DAYS", 30usize)?;
        if lookback_days == 0 || lookback_days > MAX_LOOKBACK_DAYS {
            return Err(TrackerError::Config(format!(
                "TRACKER_LOOKBACK_DAYS must be between 1 and {}",
                MAX_LOOKBACK_DAYS
            )));
        }

        Ok(Self {
            bind: env_str("TRACKER_BIND", "127.0.0.1"),
            port: env_parse("TRACKER_PORT", 5000u16)?,
            data_source,
            coinapi_key,
            coinapi_base_url: env_str("COINAPI_BASE_URL", CoinApiClient::DEFAULT_BASE_URL),
            lookback_days,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
