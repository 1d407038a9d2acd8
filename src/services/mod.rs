//! Services behind the routes
//!
//! Each service is a set of plain functions over the registry and its assets.

pub mod chart_service;
pub mod metrics_service;
pub mod price_service;
pub mod sample_service;
