//! Mapping provider client.
//!
//! This module talks to the Google Maps Platform web services (Geocoding,
//! Places Nearby Search, Directions) and converts responses to domain types.
//! A fixture-backed mock client stands in for the live API in development
//! and tests, and a retry wrapper smooths over transient failures.

mod client;
mod convert;
mod error;
mod links;
mod mock;
mod retry;
mod service;
mod types;

pub use client::{GoogleMapsClient, MapsConfig};
pub use error::MapsError;
pub use links::{directions_url, place_url};
pub use mock::{MockFixture, MockMapsClient, MockPlace};
pub use retry::{RecordingSleeper, RetryPolicy, RetryingMaps, Sleeper, TokioSleeper, with_retry};
pub use service::{MapsBackend, MappingService};
