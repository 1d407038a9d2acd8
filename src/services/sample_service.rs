use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;

pub const MIN_SAMPLE_PRICE: f64 = 100.0;
pub const MAX_SAMPLE_PRICE: f64 = 100_000.0;

/// Generate `count` random prices in the default sample range
pub fn generate_prices(count: usize) -> Vec<f64> {
    generate_prices_with(
        &mut rand::thread_rng(),
        count,
        MIN_SAMPLE_PRICE,
        MAX_SAMPLE_PRICE,
    )
}

/// Generate `count` prices drawn uniformly from `[min, max]`, rounded to cents
pub fn generate_prices_with<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    min: f64,
    max: f64,
) -> Vec<f64> {
    (0..count)
        .map(|_| round_cents(rng.gen_range(min..=max)))
        .collect()
}

/// Consecutive days ending today (UTC), oldest first
pub fn generate_dates(count: usize) -> Vec<NaiveDate> {
    generate_dates_ending(count, Utc::now().date_naive())
}

/// Consecutive days ending at `end`, oldest first
pub fn generate_dates_ending(count: usize, end: NaiveDate) -> Vec<NaiveDate> {
    (0..count)
        .rev()
        .map(|days_back| end - Duration::days(days_back as i64))
        .collect()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
