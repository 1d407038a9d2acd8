//! Chart generation models

use chrono::NaiveDate;

/// A single data point on a price chart
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Pair dates and prices by index. Any excess on either side is dropped.
pub fn align(dates: &[NaiveDate], prices: &[f64]) -> Vec<PricePoint> {
    dates
        .iter()
        .zip(prices.iter())
        .map(|(date, price)| PricePoint {
            date: *date,
            price: *price,
        })
        .collect()
}
