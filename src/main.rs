use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod models;
mod registry;
mod routes;
mod services;
mod state;
mod utils;

use api::coinapi::CoinApiClient;
use config::{DataSource, TrackerConfig};
use registry::Registry;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crypto_price_tracker=debug,tower_http=info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📈 Starting crypto price tracker...");

    let config = match TrackerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Populating {} days of sample prices (source: {:?})",
        config.lookback_days, config.data_source
    );
    let mut registry = Registry::with_sample_data(config.lookback_days);

    if config.data_source == DataSource::CoinApi {
        if let Some(key) = config.coinapi_key.clone() {
            let client = CoinApiClient::with_base_url(key, config.coinapi_base_url.clone());
            let report = registry.refresh(&client, config.lookback_days).await;
            for (name, reason) in &report.failed {
                warn!("{} keeps sample prices: {}", name, reason);
            }
        }
    }

    let addr = config.listen_addr();
    let state = AppState::new(config, registry);

    let app = routes::app_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Tracker listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, gracefully stopping…");
}
