use chrono::{Duration, NaiveDateTime, Utc};

use crate::api::coinapi::SourceError;

/// A provider of daily closing prices for a ticker symbol
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    /// Closing prices from `time_start` onwards, oldest first
    async fn fetch_daily_closes(
        &self,
        symbol: &str,
        time_start: NaiveDateTime,
    ) -> Result<Vec<f64>, SourceError>;
}

/// Start of the trailing window of `days` days ending now
pub fn window_start(days: usize) -> NaiveDateTime {
    (Utc::now() - Duration::days(days as i64)).naive_utc()
}
