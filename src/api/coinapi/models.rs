use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One daily OHLCV candle from the history endpoint. Only the close is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OhlcvCandle {
    pub price_close: f64,
}

/// Error body returned by the API alongside non-2xx statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}

/// Failure fetching or decoding a price series from the external source
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// 401 Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// 429 Too Many Requests
    #[error("Rate Limited: {0}")]
    RateLimited(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
    /// The response held no candles
    #[error("No price data returned for {0}")]
    MissingData(String),
}
