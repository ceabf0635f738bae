//! Mock mapping client for testing without API access.
//!
//! Serves places from a JSON fixture as if they were live API responses:
//! geocoding by name, nearby search by great-circle distance, and routes
//! estimated from distance at a fixed speed.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;

use crate::domain::{GeoPoint, RouteInfo, TravelMode};

use super::error::MapsError;
use super::links::directions_url;
use super::service::MappingService;

/// Road distance is longer than the great-circle distance.
const ROAD_FACTOR: f64 = 1.25;

fn default_speed() -> f64 {
    80.0
}

fn default_true() -> bool {
    true
}

/// On-disk fixture format.
#[derive(Debug, Clone, Deserialize)]
pub struct MockFixture {
    /// Average travel speed used to estimate durations.
    #[serde(default = "default_speed")]
    pub speed_kmh: f64,

    pub places: Vec<MockPlace>,

    /// Place-ID pairs with no route between them (either direction).
    #[serde(default)]
    pub unroutable: Vec<(String, String)>,
}

/// A place in the fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct MockPlace {
    pub display_name: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    pub place_id: String,

    /// Extra names that geocode to this place.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Whether nearby search may return this place.
    #[serde(default = "default_true")]
    pub nearby: bool,
}

impl MockPlace {
    fn to_point(&self) -> GeoPoint {
        GeoPoint::new(
            self.display_name.clone(),
            self.country.clone(),
            self.lat,
            self.lng,
            self.place_id.clone(),
        )
    }

    /// Whether `query` names this place (case-insensitive).
    fn answers_to(&self, query: &str) -> bool {
        let short_name = self
            .display_name
            .split(',')
            .next()
            .unwrap_or(&self.display_name);

        std::iter::once(self.display_name.as_str())
            .chain(std::iter::once(short_name))
            .chain(self.aliases.iter().map(String::as_str))
            .any(|name| name.trim().eq_ignore_ascii_case(query))
    }
}

#[derive(Debug, Default)]
struct CallCounters {
    geocode: AtomicUsize,
    nearby: AtomicUsize,
    route: AtomicUsize,
    /// Calls still to fail with a transient error.
    pending_failures: AtomicUsize,
}

/// Mock mapping client that serves data from a fixture.
///
/// This is useful for development and testing without Google credentials.
/// Clones share call counters.
#[derive(Debug, Clone)]
pub struct MockMapsClient {
    places: Arc<Vec<MockPlace>>,
    unroutable: Arc<HashSet<(String, String)>>,
    speed_kmh: f64,
    counters: Arc<CallCounters>,
}

impl MockMapsClient {
    /// Create a mock client by loading a JSON fixture file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, MapsError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| MapsError::NotConfigured(format!(
            "failed to read mock data {}: {e}",
            path.display()
        )))?;

        let fixture: MockFixture = serde_json::from_str(&json).map_err(|e| MapsError::Json {
            message: format!("failed to parse {}: {e}", path.display()),
            body: None,
        })?;

        if fixture.places.is_empty() {
            return Err(MapsError::NotConfigured(format!(
                "no places in mock data {}",
                path.display()
            )));
        }

        Ok(Self::from_fixture(fixture))
    }

    /// Create a mock client from an in-memory fixture.
    pub fn from_fixture(fixture: MockFixture) -> Self {
        let unroutable = fixture
            .unroutable
            .into_iter()
            .flat_map(|(a, b)| [(a.clone(), b.clone()), (b, a)])
            .collect();

        Self {
            places: Arc::new(fixture.places),
            unroutable: Arc::new(unroutable),
            speed_kmh: fixture.speed_kmh,
            counters: Arc::new(CallCounters::default()),
        }
    }

    /// Make the next `n` calls fail with a transient server error.
    pub fn fail_next(&self, n: usize) {
        self.counters.pending_failures.store(n, Ordering::SeqCst);
    }

    /// Number of geocode calls received.
    pub fn geocode_calls(&self) -> usize {
        self.counters.geocode.load(Ordering::SeqCst)
    }

    /// Number of nearby-search calls received.
    pub fn nearby_calls(&self) -> usize {
        self.counters.nearby.load(Ordering::SeqCst)
    }

    /// Number of route calls received.
    pub fn route_calls(&self) -> usize {
        self.counters.route.load(Ordering::SeqCst)
    }

    /// Total calls of any kind.
    pub fn call_count(&self) -> usize {
        self.geocode_calls() + self.nearby_calls() + self.route_calls()
    }

    /// Consume one scripted failure, if any remain.
    fn scripted_failure(&self) -> Result<(), MapsError> {
        let took = self
            .counters
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if took {
            Err(MapsError::Api {
                status: 503,
                message: "mock transient failure".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn format_duration(&self, distance_km: f64) -> String {
        let total_mins = (distance_km / self.speed_kmh * 60.0).round() as u64;
        let (hours, mins) = (total_mins / 60, total_mins % 60);
        match (hours, mins) {
            (0, m) => format!("{m} mins"),
            (1, 0) => "1 hour".to_string(),
            (1, m) => format!("1 hour {m} mins"),
            (h, 0) => format!("{h} hours"),
            (h, m) => format!("{h} hours {m} mins"),
        }
    }
}

impl MappingService for MockMapsClient {
    async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, MapsError> {
        self.counters.geocode.fetch_add(1, Ordering::SeqCst);
        self.scripted_failure()?;

        let query = text.trim();
        Ok(self
            .places
            .iter()
            .find(|p| p.answers_to(query))
            .map(MockPlace::to_point))
    }

    async fn nearby_places(
        &self,
        center: &GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<GeoPoint>, MapsError> {
        self.counters.nearby.fetch_add(1, Ordering::SeqCst);
        self.scripted_failure()?;

        Ok(self
            .places
            .iter()
            .filter(|p| p.nearby)
            .map(MockPlace::to_point)
            .filter(|p| p.distance_km(center) <= radius_km)
            .collect())
    }

    async fn route(&self, from: &GeoPoint, to: &GeoPoint) -> Result<Option<RouteInfo>, MapsError> {
        self.counters.route.fetch_add(1, Ordering::SeqCst);
        self.scripted_failure()?;

        if self
            .unroutable
            .contains(&(from.place_id.clone(), to.place_id.clone()))
        {
            return Ok(None);
        }

        let distance_km = (from.distance_km(to) * ROAD_FACTOR * 10.0).round() / 10.0;
        Ok(Some(RouteInfo {
            distance_km,
            duration_text: self.format_duration(distance_km),
            directions_url: directions_url(from, to, TravelMode::default()),
        }))
    }
}
