use crate::models::{ChangeRow, PriceChange};
use crate::registry::Registry;

/// Windows shown on the currencies table, in data points
pub const WINDOW_1D: usize = 2;
pub const WINDOW_7D: usize = 7;
pub const WINDOW_30D: usize = 30;

/// Percentage change from the price `window` points back to the latest price.
///
/// A window longer than the history yields `InsufficientData`; a zero or
/// non-finite reference price yields `Undefined`.
pub fn percentage_change(prices: &[f64], window: usize) -> PriceChange {
    if window == 0 || prices.len() < window {
        return PriceChange::InsufficientData;
    }

    let last_price = prices[prices.len() - 1];
    let first_price = prices[prices.len() - window];

    if first_price == 0.0 || !first_price.is_finite() {
        return PriceChange::Undefined;
    }

    let change = (last_price - first_price) / first_price * 100.0;
    if change.is_finite() {
        PriceChange::Percent(change)
    } else {
        PriceChange::Undefined
    }
}

/// 1-day, 7-day and 30-day changes for every asset, in registry order
pub fn change_table(registry: &Registry) -> Vec<ChangeRow<'_>> {
    registry
        .iter()
        .map(|asset| ChangeRow {
            asset,
            change_1d: percentage_change(&asset.prices, WINDOW_1D),
            change_7d: percentage_change(&asset.prices, WINDOW_7D),
            change_30d: percentage_change(&asset.prices, WINDOW_30D),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Asset;

    #[test]
    fn test_simple_change() {
        let change = percentage_change(&[100.0, 200.0], 2);
        assert_eq!(change, PriceChange::Percent(100.0));
        assert_eq!(change.to_string(), "100.00%");
    }

    #[test]
    fn test_uses_price_window_points_back() {
        let prices = [50.0, 100.0, 110.0, 80.0];
        assert_eq!(percentage_change(&prices, 3).to_string(), "-20.00%");
        assert_eq!(percentage_change(&prices, 4).to_string(), "60.00%");
        assert_eq!(percentage_change(&prices, 1).to_string(), "0.00%");
    }

    #[test]
    fn test_thousands_separator_in_output() {
        let change = percentage_change(&[1.0, 12_346.0], 2);
        assert_eq!(change.to_string(), "1,234,500.00%");
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(percentage_change(&[100.0], 2), PriceChange::InsufficientData);
        assert_eq!(percentage_change(&[], 1), PriceChange::InsufficientData);
        assert_eq!(percentage_change(&[1.0, 2.0], 0), PriceChange::InsufficientData);
        assert_eq!(
            percentage_change(&[1.0; 29], WINDOW_30D).to_string(),
            "Insufficient data"
        );
    }

    #[test]
    fn test_drop_to_zero_is_defined() {
        assert_eq!(percentage_change(&[100.0, 0.0], 2).to_string(), "-100.00%");
    }

    #[test]
    fn test_zero_reference_is_undefined() {
        assert_eq!(percentage_change(&[0.0, 100.0], 2), PriceChange::Undefined);
        assert_eq!(percentage_change(&[0.0, 0.0], 2), PriceChange::Undefined);
        assert_eq!(
            percentage_change(&[f64::NAN, 1.0], 2),
            PriceChange::Undefined
        );
    }

    #[test]
    fn test_change_table() {
        let registry = Registry::new(vec![
            Asset::new("Bitcoin", "BTC", 1.1e12, (1..=30).map(|p| p as f64).collect()),
            Asset::new("Ethereum", "ETH", 300e9, vec![10.0, 20.0]),
        ]);
        let rows = change_table(&registry);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].asset.name, "Bitcoin");
        assert_eq!(rows[0].change_1d.to_string(), "3.45%");
        assert_eq!(rows[0].change_30d.to_string(), "2,900.00%");
        assert_eq!(rows[1].change_1d.to_string(), "100.00%");
        assert_eq!(rows[1].change_7d, PriceChange::InsufficientData);
    }
}
