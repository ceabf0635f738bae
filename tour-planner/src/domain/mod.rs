//! Domain types for the tour planner.
//!
//! This module contains the value types that flow through itinerary
//! generation. Types that carry invariants enforce them at construction
//! time, so code that receives them can trust their validity.

mod error;
mod geo;
mod itinerary;
mod trip;

pub use error::DomainError;
pub use geo::{Coordinates, GeoPoint};
pub use itinerary::{Itinerary, RouteInfo, ScheduledStay, TravelLeg, TravelMode};
pub use trip::{ConstraintRegion, TripWindow, parse_trip_date};
