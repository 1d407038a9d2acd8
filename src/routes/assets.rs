use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::error::TrackerError;
use crate::services::{chart_service, metrics_service, sample_service};
use crate::state::AppState;
use crate::utils::format::{format_thousands, format_usd};
use crate::utils::html::{escape, page};
use crate::utils::Table;

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/crypto/:name", get(crypto_detail))
        .route("/plot/:name", get(plot_price))
        .route("/currencies", get(currencies_table))
}

fn latest_price_text(prices: &[f64]) -> String {
    prices
        .last()
        .map(|p| format_usd(*p))
        .unwrap_or_else(|| "n/a".to_string())
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    if state.registry.is_empty() {
        return Html(page("Cryptocurrency Prices", "<p>No assets tracked.</p>"));
    }

    let mut table = Table::new(vec!["Name", "Symbol", "Price", "Market Cap"])
        .with_link_column(0, "/crypto/");

    for asset in state.registry.assets() {
        let price = latest_price_text(&asset.prices);
        let market_cap = format_usd(asset.market_cap);
        table.add_row(vec![
            asset.name.as_str(),
            asset.symbol.as_str(),
            price.as_str(),
            market_cap.as_str(),
        ]);
    }

    Html(page("Cryptocurrency Prices", &table.render()))
}

async fn crypto_detail(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Html<String>, TrackerError> {
    let asset = state.registry.lookup(&name)?;
    let dates = sample_service::generate_dates(asset.prices.len());

    let mut history = Table::new(vec!["Date", "Price"]);
    for (date, price) in dates.iter().zip(asset.prices.iter()).rev() {
        let date = date.format("%Y-%m-%d").to_string();
        let price = format_thousands(*price, 2);
        history.add_row(vec![date.as_str(), price.as_str()]);
    }

    let body = format!(
        "<p>Symbol: {symbol}</p>\n\
         <p>Price: {price}</p>\n\
         <p>Market Cap: {market_cap}</p>\n\
         <img src=\"/plot/{encoded}\" alt=\"Price chart for {name}\">\n\
         <h2>History</h2>\n\
         {history}",
        symbol = escape(&asset.symbol),
        price = latest_price_text(&asset.prices),
        market_cap = format_usd(asset.market_cap),
        encoded = urlencoding::encode(&asset.name),
        name = escape(&asset.name),
        history = history.render(),
    );

    Ok(Html(page(&asset.to_string(), &body)))
}

async fn plot_price(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, TrackerError> {
    let bytes =
        tokio::task::spawn_blocking(move || chart_service::render(&state.registry, &name)).await??;

    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}

async fn currencies_table(State(state): State<Arc<AppState>>) -> Html<String> {
    let mut table = Table::new(vec!["Name", "Symbol", "Price", "1 Day", "7 Days", "30 Days"])
        .with_link_column(0, "/crypto/");

    for row in metrics_service::change_table(&state.registry) {
        let price = latest_price_text(&row.asset.prices);
        let change_1d = row.change_1d.to_string();
        let change_7d = row.change_7d.to_string();
        let change_30d = row.change_30d.to_string();
        table.add_row(vec![
            row.asset.name.as_str(),
            row.asset.symbol.as_str(),
            price.as_str(),
            change_1d.as_str(),
            change_7d.as_str(),
            change_30d.as_str(),
        ]);
    }

    Html(page("Price Changes", &table.render()))
}
