//! Data models for the price tracker
//!
//! Plain records shared between the registry, the services and the routes.

pub mod asset;
pub mod change;
pub mod chart;

pub use asset::{Asset, DEFAULT_ASSETS};
pub use change::{ChangeRow, PriceChange};
pub use chart::PricePoint;
