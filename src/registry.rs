//! The in-memory asset registry.
//!
//! Built once at startup, optionally refreshed from an external price source
//! before serving, then shared read-only with the routes.

use tracing::{debug, info, warn};

use crate::api::coinapi::SourceError;
use crate::error::TrackerError;
use crate::models::{Asset, DEFAULT_ASSETS};
use crate::services::price_service::{self, PriceSource};
use crate::services::sample_service;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    assets: Vec<Asset>,
}

/// Outcome of a refresh pass
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub updated: Vec<String>,
    /// (asset name, error message)
    pub failed: Vec<(String, String)>,
}

impl Registry {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    /// The default asset list with `lookback` days of generated prices each
    pub fn with_sample_data(lookback: usize) -> Self {
        let assets = DEFAULT_ASSETS
            .iter()
            .map(|(name, symbol, market_cap)| {
                Asset::new(name, symbol, *market_cap, sample_service::generate_prices(lookback))
            })
            .collect();
        Self { assets }
    }

    /// Find an asset by name, ignoring case
    pub fn lookup(&self, name: &str) -> Result<&Asset, TrackerError> {
        let wanted = name.to_lowercase();
        let found = self.assets.iter().find(|a| a.name.to_lowercase() == wanted);
        debug!("Lookup '{}': {}", name, if found.is_some() { "hit" } else { "miss" });
        found.ok_or_else(|| TrackerError::NotFound(name.to_string()))
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Asset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Replace each asset's prices with the source's trailing `lookback` days.
    ///
    /// Longer series keep only their most recent `lookback` closes. Failures,
    /// including series too short to chart, are logged and leave that asset's
    /// prices untouched; the pass always visits every asset.
    pub async fn refresh<S: PriceSource>(&mut self, source: &S, lookback: usize) -> RefreshReport {
        let time_start = price_service::window_start(lookback);
        let mut report = RefreshReport::default();

        for asset in self.assets.iter_mut() {
            let fetched = source
                .fetch_daily_closes(&asset.symbol, time_start)
                .await
                .and_then(|prices| trim_to_window(&asset.symbol, prices, lookback));

            match fetched {
                Ok(prices) => {
                    debug!("Fetched {} prices for {}", prices.len(), asset.name);
                    asset.set_prices(prices);
                    report.updated.push(asset.name.clone());
                }
                Err(e) => {
                    warn!("Error for {}: {}", asset.name, e);
                    report.failed.push((asset.name.clone(), e.to_string()));
                }
            }
        }

        info!(
            "Refresh finished: {} updated, {} failed",
            report.updated.len(),
            report.failed.len()
        );
        report
    }
}

/// Keep the last `lookback` closes; fewer than two cannot be charted
fn trim_to_window(
    symbol: &str,
    mut prices: Vec<f64>,
    lookback: usize,
) -> Result<Vec<f64>, SourceError> {
    if prices.len() < 2 {
        return Err(SourceError::MissingData(symbol.to_string()));
    }
    Ok(prices.split_off(prices.len().saturating_sub(lookback)))
}
