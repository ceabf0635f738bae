//! Itinerary types.
//!
//! An `Itinerary` is the finished product of generation: dated stays at
//! each location plus the travel legs between them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{GeoPoint, TripWindow};

/// How a leg is travelled. Passed through to the routing provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    /// The provider's name for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" | "drive" | "car" => Ok(TravelMode::Driving),
            "walking" | "walk" => Ok(TravelMode::Walking),
            "bicycling" | "cycling" | "bike" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            other => Err(format!("unknown travel mode: {other}")),
        }
    }
}

/// Result of a successful route lookup between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub distance_km: f64,
    /// Provider-formatted travel time, e.g. "4 hours 30 mins".
    pub duration_text: String,
    pub directions_url: String,
}

/// A dated stay at one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledStay {
    pub location: GeoPoint,
    pub arrive: NaiveDate,
    pub depart: NaiveDate,
    pub days: u32,
    /// Link to the location on the map provider.
    pub map_url: String,
}

/// Travel between two consecutive stays.
///
/// When the route lookup failed, `distance_km` and `duration_text` are
/// `None` and `lookup_failed` is set; the directions link is still usable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelLeg {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub distance_km: Option<f64>,
    pub duration_text: Option<String>,
    pub directions_url: String,
    pub mode: TravelMode,
    pub lookup_failed: bool,
}

impl TravelLeg {
    /// Creates a leg from a successful route lookup.
    pub fn routed(from: GeoPoint, to: GeoPoint, route: RouteInfo, mode: TravelMode) -> Self {
        Self {
            from,
            to,
            distance_km: Some(route.distance_km),
            duration_text: Some(route.duration_text),
            directions_url: route.directions_url,
            mode,
            lookup_failed: false,
        }
    }

    /// Creates a leg for a pair with no known route.
    pub fn unrouted(
        from: GeoPoint,
        to: GeoPoint,
        directions_url: String,
        mode: TravelMode,
    ) -> Self {
        Self {
            from,
            to,
            distance_km: None,
            duration_text: None,
            directions_url,
            mode,
            lookup_failed: true,
        }
    }
}

/// A complete generated trip.
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    pub trip_window: TripWindow,
    pub stays: Vec<ScheduledStay>,
    pub legs: Vec<TravelLeg>,
    /// Non-fatal problems met during generation.
    pub warnings: Vec<String>,
}

impl Itinerary {
    /// Number of intermediate stops (stays other than start and end).
    pub fn stop_count(&self) -> usize {
        self.stays.len().saturating_sub(2)
    }

    /// Total routed distance, ignoring legs whose lookup failed.
    pub fn total_distance_km(&self) -> f64 {
        self.legs.iter().filter_map(|l| l.distance_km).sum()
    }

    /// The start location.
    pub fn origin(&self) -> Option<&GeoPoint> {
        self.stays.first().map(|s| &s.location)
    }

    /// The end location.
    pub fn destination(&self) -> Option<&GeoPoint> {
        self.stays.last().map(|s| &s.location)
    }
}
