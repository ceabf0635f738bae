//! Itinerary planner.
//!
//! Turns a start, an end and a date range into a dated multi-stop trip.
//! Stops are picked from the mapping provider's nearby places at evenly
//! spaced points along the straight line between the endpoints, optionally
//! restricted to constraint regions. Days are then shared out across the
//! locations and each leg is routed.

mod annotate;
mod config;
mod constraints;
mod error;
mod generator;
mod request;
mod resolver;
mod schedule;
mod stops;

#[cfg(test)]
mod generator_tests;

pub use annotate::{Annotation, TravelAnnotator};
pub use config::{DEFAULT_MAX_STOPS, DEFAULT_MIN_STAY, PlannerConfig};
pub use constraints::{Anchor, ConstraintFilter, RegionMatcher, SubstringMatcher, matches};
pub use error::PlanError;
pub use generator::ItineraryGenerator;
pub use request::{TripRequest, ValidatedTrip};
pub use resolver::LocationResolver;
pub use schedule::{allocate_days, build_schedule};
pub use stops::{StopSelection, StopSelector, target_positions};
