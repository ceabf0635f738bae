//! Application state for the web layer.

use std::sync::Arc;

use crate::maps::{MapsBackend, RetryingMaps};
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// Only immutable configuration and the mapping client are shared; every
/// request builds its own planner working set.
#[derive(Clone)]
pub struct AppState {
    /// Mapping client with retries
    pub maps: Arc<RetryingMaps<MapsBackend>>,

    /// Planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(maps: RetryingMaps<MapsBackend>, config: PlannerConfig) -> Self {
        Self {
            maps: Arc::new(maps),
            config: Arc::new(config),
        }
    }
}
