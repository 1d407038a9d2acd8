pub mod client;
pub mod models;

pub use client::CoinApiClient;
pub use models::SourceError;
