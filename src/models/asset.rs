//! Tracked asset models

use std::fmt;

/// A tracked cryptocurrency and its daily price history (oldest first)
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub name: String,
    pub symbol: String,
    pub market_cap: f64,
    pub prices: Vec<f64>,
}

impl Asset {
    pub fn new(name: &str, symbol: &str, market_cap: f64, prices: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            market_cap,
            prices,
        }
    }

    /// Most recent price, if the series is not empty
    pub fn latest_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    /// Replace the whole price series
    pub fn set_prices(&mut self, prices: Vec<f64>) {
        self.prices = prices;
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.latest_price() {
            Some(price) => write!(
                f,
                "{} ({}): Price - ${}, Market Cap - ${}",
                self.name, self.symbol, price, self.market_cap
            ),
            None => write!(
                f,
                "{} ({}): Price - n/a, Market Cap - ${}",
                self.name, self.symbol, self.market_cap
            ),
        }
    }
}

/// (name, symbol, market cap) of the assets the tracker ships with
pub const DEFAULT_ASSETS: &[(&str, &str, f64)] = &[
    ("Bitcoin", "BTC", 1.1e12),
    ("Ethereum", "ETH", 300e9),
    ("Cardano", "ADA", 60e9),
    ("Solana", "SOL", 50e9),
    ("XRP", "XRP", 45e9),
    ("Polkadot", "DOT", 40e9),
    ("Dogecoin", "DOGE", 30e9),
    ("Avalanche", "AVAX", 20e9),
    ("Chainlink", "LINK", 15e9),
    ("Litecoin", "LTC", 10e9),
    ("Stellar", "XLM", 8e9),
    ("Uniswap", "UNI", 6e9),
    ("Bitcoin Cash", "BCH", 5e9),
    ("Algorand", "ALGO", 3e9),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_latest_price() {
        let asset = Asset::new("Bitcoin", "BTC", 1.1e12, vec![100.0, 250.5]);
        assert_eq!(
            asset.to_string(),
            "Bitcoin (BTC): Price - $250.5, Market Cap - $1100000000000"
        );
    }

    #[test]
    fn test_latest_price_empty() {
        let asset = Asset::new("XRP", "XRP", 45e9, Vec::new());
        assert_eq!(asset.latest_price(), None);
    }
}
