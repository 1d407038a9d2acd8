use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by the registry, the services and the routes.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Cryptocurrency not found")]
    NotFound(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InsufficientData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Chart(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("{self}");
        }

        (status, self.to_string()).into_response()
    }
}

impl From<tokio::task::JoinError> for TrackerError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = TrackerError::NotFound("dogecoin2".to_string()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let chart = TrackerError::Chart("boom".to_string()).into_response();
        assert_eq!(chart.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_message() {
        let err = TrackerError::NotFound("nope".to_string());
        assert_eq!(err.to_string(), "Cryptocurrency not found");
    }
}
