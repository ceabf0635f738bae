//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{ConstraintRegion, Itinerary};
use crate::planner::{DEFAULT_MAX_STOPS, DEFAULT_MIN_STAY, TripRequest};

/// Request to generate an itinerary.
#[derive(Debug, Deserialize)]
pub struct ItineraryRequest {
    /// Start location text
    pub start: String,

    /// End location text
    pub end: String,

    /// First day of the trip
    pub start_date: String,

    /// Departure day from the final stay
    pub end_date: String,

    /// Comma-separated constraint regions, e.g. "Netherlands, Germany"
    #[serde(default)]
    pub locations: Option<String>,

    /// Maximum intermediate stops (defaults to 5)
    #[serde(default)]
    pub max_stops: Option<usize>,

    /// Minimum days per location (defaults to 1)
    #[serde(default)]
    pub min_stay: Option<u32>,
}

impl ItineraryRequest {
    /// Convert to a planner request.
    pub fn into_trip_request(self) -> TripRequest {
        let constraints = self
            .locations
            .as_deref()
            .map(ConstraintRegion::parse_list)
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.raw_text().to_string());

        TripRequest::new(self.start, self.end, self.start_date, self.end_date)
            .with_constraints(constraints)
            .with_max_stops(self.max_stops.unwrap_or(DEFAULT_MAX_STOPS))
            .with_min_stay(self.min_stay.unwrap_or(DEFAULT_MIN_STAY))
    }
}

/// Response for itinerary generation.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub success: bool,

    pub itinerary: Itinerary,

    /// Number of intermediate stops found
    pub stop_count: usize,

    /// Sum of routed leg distances
    pub total_distance_km: f64,
}

impl ItineraryResponse {
    pub fn new(itinerary: Itinerary) -> Self {
        Self {
            success: true,
            stop_count: itinerary.stop_count(),
            total_distance_km: itinerary.total_distance_km(),
            itinerary,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,

    /// Error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
