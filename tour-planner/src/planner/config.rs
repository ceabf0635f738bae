//! Planner configuration.

use crate::cache::CacheConfig;
use crate::domain::TravelMode;

/// Intermediate stops requested when the caller doesn't say.
pub const DEFAULT_MAX_STOPS: usize = 5;

/// Minimum days per location when the caller doesn't say.
pub const DEFAULT_MIN_STAY: u32 = 1;

/// Configuration parameters for itinerary generation.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Largest `max_stops` a request may ask for.
    pub max_stops_limit: usize,

    /// Radius of the nearby-places query around each stop target (km).
    pub search_radius_km: f64,

    /// Candidates closer than this to the start or end are not stops (km).
    pub min_endpoint_distance_km: f64,

    /// A candidate within this distance of a constraint region's anchor
    /// point counts as inside the region (km).
    pub constraint_radius_km: f64,

    /// Travel mode recorded on legs and used in directions links.
    pub travel_mode: TravelMode,

    /// Settings for the per-request geocode cache.
    pub cache: CacheConfig,
}

impl PlannerConfig {
    /// Create a new configuration with the given search parameters.
    pub fn new(
        max_stops_limit: usize,
        search_radius_km: f64,
        min_endpoint_distance_km: f64,
        constraint_radius_km: f64,
    ) -> Self {
        Self {
            max_stops_limit,
            search_radius_km,
            min_endpoint_distance_km,
            constraint_radius_km,
            ..Self::default()
        }
    }

    /// Set the travel mode.
    pub fn with_travel_mode(mut self, mode: TravelMode) -> Self {
        self.travel_mode = mode;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_stops_limit: 10,
            search_radius_km: 30.0,
            min_endpoint_distance_km: 10.0,
            constraint_radius_km: 150.0,
            travel_mode: TravelMode::Driving,
            cache: CacheConfig::default(),
        }
    }
}
