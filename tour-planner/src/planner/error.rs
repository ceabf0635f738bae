//! Errors from itinerary generation.

use crate::maps::MapsError;

/// Error from itinerary generation.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Geocoding yielded nothing for a location.
    #[error("location not found: {query:?}")]
    LocationNotFound { query: String },

    /// Degenerate input, e.g. identical start and end.
    #[error("invalid trip: {0}")]
    InvalidTrip(String),

    /// A date that could not be parsed or is out of order.
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidDate {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// Not enough days to give every location its minimum stay.
    #[error(
        "{total_days} days is too short for {stops} locations with a minimum stay of {min_stay} days each"
    )]
    InsufficientDuration {
        total_days: u32,
        stops: usize,
        min_stay: u32,
    },

    /// No route between two consecutive stays. Recorded per leg, not fatal.
    #[error("no route found from {from} to {to}")]
    RouteNotFound { from: String, to: String },

    /// The mapping provider failed after retries. `target` names the text,
    /// place or pair being looked up when there is one.
    #[error(
        "mapping service failed during {step}{}: {source}",
        .target.as_deref().map(|t| format!(" of {t:?}")).unwrap_or_default()
    )]
    MappingService {
        step: &'static str,
        target: Option<String>,
        source: MapsError,
    },
}

impl PlanError {
    /// Wrap a provider failure with the step and what it was looking up.
    pub fn mapping_for(
        step: &'static str,
        target: impl Into<String>,
    ) -> impl FnOnce(MapsError) -> PlanError {
        let target = target.into();
        move |source| PlanError::MappingService {
            step,
            target: Some(target),
            source,
        }
    }

    /// Whether the caller supplied bad input (as opposed to the world or
    /// the provider failing).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PlanError::InvalidTrip(_)
                | PlanError::InvalidDate { .. }
                | PlanError::InsufficientDuration { .. }
        )
    }
}
