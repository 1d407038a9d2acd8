use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::registry::Registry;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
///
/// The registry is fully populated before the state is built and never
/// mutated afterwards.
pub struct AppState {
    pub config: TrackerConfig,
    pub registry: Registry,
}

impl AppState {
    pub fn new(config: TrackerConfig, registry: Registry) -> Arc<Self> {
        Arc::new(Self { config, registry })
    }
}
