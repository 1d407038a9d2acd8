use chrono::NaiveDateTime;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{ErrorResponse, OhlcvCandle, SourceError};
use crate::services::price_service::PriceSource;

/// CoinAPI client for daily OHLCV price history
pub struct CoinApiClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl CoinApiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://rest.coinapi.io/v1";
    const HISTORY_LIMIT: u32 = 360;

    /// Create a new client against `base_url`, normally `DEFAULT_BASE_URL`
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create default headers with the API key
    fn create_headers(&self) -> Result<HeaderMap, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let key_value = HeaderValue::from_str(&self.api_key)
            .map_err(|e| SourceError::RequestError(format!("Invalid API key header: {}", e)))?;
        headers.insert("x-coinapi-key", key_value);

        Ok(headers)
    }

    /// GET /ohlcv/BITSTAMP_SPOT_{symbol}_USD/history
    pub fn history_url(&self, symbol: &str, time_start: NaiveDateTime) -> String {
        format!(
            "{}/ohlcv/BITSTAMP_SPOT_{}_USD/history?period_id=1DAY&time_start={}&limit={}",
            self.base_url,
            symbol.to_uppercase(),
            time_start.format("%Y-%m-%dT%H:%M:%S"),
            Self::HISTORY_LIMIT
        )
    }

    /// Map a non-2xx status and its body to a typed error
    fn error_for_status(status: u16, body_text: String) -> SourceError {
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or(body_text);

        match status {
            401 => SourceError::Unauthorized(message),
            403 => SourceError::Forbidden(message),
            429 => {
                warn!("CoinAPI rate limit hit: {}", message);
                SourceError::RateLimited(message)
            }
            500..=599 => SourceError::ServerError(status, message),
            _ => SourceError::HttpError(status, message),
        }
    }

    /// Decode a history response body into closing prices, oldest first
    pub fn parse_history(symbol: &str, body_text: &str) -> Result<Vec<f64>, SourceError> {
        let candles: Vec<OhlcvCandle> = serde_json::from_str(body_text)
            .map_err(|e| SourceError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if candles.is_empty() {
            return Err(SourceError::MissingData(symbol.to_string()));
        }

        Ok(candles.into_iter().map(|c| c.price_close).collect())
    }
}

impl PriceSource for CoinApiClient {
    async fn fetch_daily_closes(
        &self,
        symbol: &str,
        time_start: NaiveDateTime,
    ) -> Result<Vec<f64>, SourceError> {
        let url = self.history_url(symbol, time_start);
        let headers = self.create_headers()?;
        debug!("Fetching CoinAPI history for {}", symbol);

        let response = self
            .http_client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| SourceError::RequestError(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| SourceError::RequestError(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(Self::error_for_status(status.as_u16(), body_text));
        }

        Self::parse_history(symbol, &body_text)
    }
}
