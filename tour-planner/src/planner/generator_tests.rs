//! End-to-end tests for itinerary generation against the mock provider.

use super::*;
use crate::domain::{GeoPoint, Itinerary, RouteInfo};
use crate::maps::{
    MapsError, MappingService, MockMapsClient, RecordingSleeper, RetryPolicy, RetryingMaps,
};
use std::sync::Mutex;

fn mock() -> MockMapsClient {
    MockMapsClient::new("data/mock_places.json").unwrap()
}

fn ams_to_cph() -> TripRequest {
    TripRequest::new("Amsterdam", "Copenhagen", "2025-08-03", "2025-08-10")
}

async fn generate(maps: &MockMapsClient, request: &TripRequest) -> Result<Itinerary, PlanError> {
    let config = PlannerConfig::default();
    ItineraryGenerator::new(maps, &config).generate(request).await
}

fn assert_schedule_invariants(itinerary: &Itinerary) {
    let window = &itinerary.trip_window;
    let stays = &itinerary.stays;

    assert_eq!(stays.iter().map(|s| s.days).sum::<u32>(), window.total_days());
    assert_eq!(stays[0].arrive, window.start_date());
    assert_eq!(stays[stays.len() - 1].depart, window.end_date());
    assert!(stays.windows(2).all(|w| w[0].depart == w[1].arrive));
    assert_eq!(itinerary.legs.len(), stays.len() - 1);
}

#[tokio::test]
async fn amsterdam_to_copenhagen_constrained() {
    let maps = mock();
    let request = ams_to_cph()
        .with_constraints(["Netherlands", "Germany"])
        .with_max_stops(2);

    let itinerary = generate(&maps, &request).await.unwrap();

    assert!((2..=4).contains(&itinerary.stays.len()));
    assert_schedule_invariants(&itinerary);
    for stay in &itinerary.stays[1..itinerary.stays.len() - 1] {
        let country = &stay.location.country;
        assert!(country == "Netherlands" || country == "Germany", "{country}");
    }

    let names: Vec<&str> = itinerary
        .stays
        .iter()
        .map(|s| s.location.place_id.as_str())
        .collect();
    assert_eq!(names, vec!["ams", "emden", "eckernfoerde", "cph"]);

    let days: Vec<u32> = itinerary.stays.iter().map(|s| s.days).collect();
    assert_eq!(days, vec![2, 2, 1, 2]);
    assert!(itinerary.warnings.is_empty());
}

#[tokio::test]
async fn unconstrained_trip_uses_budget() {
    let maps = mock();
    let itinerary = generate(&maps, &ams_to_cph()).await.unwrap();

    // Five targets requested; only two land near a place in the fixture
    assert_eq!(itinerary.stop_count(), 2);
    assert_schedule_invariants(&itinerary);
    assert!(itinerary.total_distance_km() > 0.0);
    assert_eq!(itinerary.origin().map(|p| p.place_id.as_str()), Some("ams"));
    assert_eq!(itinerary.destination().map(|p| p.place_id.as_str()), Some("cph"));
}

#[tokio::test]
async fn identical_start_and_end_text() {
    let maps = mock();
    let request = TripRequest::new("Amsterdam", "amsterdam", "2025-08-03", "2025-08-10");

    let err = generate(&maps, &request).await.unwrap_err();
    assert!(matches!(err, PlanError::InvalidTrip(_)));
    assert_eq!(maps.call_count(), 0);
}

#[tokio::test]
async fn different_text_same_place() {
    let maps = mock();
    let request = TripRequest::new("Amsterdam", "AMS", "2025-08-03", "2025-08-10");

    let err = generate(&maps, &request).await.unwrap_err();
    assert!(matches!(err, PlanError::InvalidTrip(_)));
    assert_eq!(maps.nearby_calls(), 0);
}

#[tokio::test]
async fn reversed_dates_make_no_calls() {
    let maps = mock();
    let request = TripRequest::new("Amsterdam", "Copenhagen", "2025-08-10", "2025-08-03");

    let err = generate(&maps, &request).await.unwrap_err();
    assert!(matches!(err, PlanError::InvalidDate { .. }));
    assert_eq!(maps.call_count(), 0);
}

#[tokio::test]
async fn unmatched_constraint_gives_direct_trip() {
    let maps = mock();
    let request = ams_to_cph().with_constraints(["Iceland"]).with_max_stops(3);

    let itinerary = generate(&maps, &request).await.unwrap();

    assert_eq!(itinerary.stays.len(), 2);
    assert_eq!(itinerary.legs.len(), 1);
    assert_schedule_invariants(&itinerary);
    assert_eq!(itinerary.warnings.len(), 1);
}

#[tokio::test]
async fn zero_stops_is_direct() {
    let maps = mock();
    let itinerary = generate(&maps, &ams_to_cph().with_max_stops(0)).await.unwrap();

    assert_eq!(itinerary.stays.len(), 2);
    assert_eq!(itinerary.legs.len(), 1);
    assert_eq!(maps.nearby_calls(), 0);
    let days: Vec<u32> = itinerary.stays.iter().map(|s| s.days).collect();
    assert_eq!(days, vec![4, 3]);
}

#[tokio::test]
async fn too_short_fails_before_any_call() {
    let maps = mock();
    let request = TripRequest::new("Amsterdam", "Copenhagen", "2025-08-03", "2025-08-05")
        .with_min_stay(2);

    let err = generate(&maps, &request).await.unwrap_err();
    assert!(matches!(err, PlanError::InsufficientDuration { .. }));
    assert_eq!(maps.call_count(), 0);
}

#[tokio::test]
async fn short_trip_drops_stops() {
    let maps = mock();
    let request = TripRequest::new("Amsterdam", "Copenhagen", "2025-08-03", "2025-08-05");

    let itinerary = generate(&maps, &request).await.unwrap();
    assert_eq!(itinerary.stays.len(), 2);
    assert_eq!(maps.nearby_calls(), 0);
}

#[tokio::test]
async fn unknown_location() {
    let maps = mock();
    let request = TripRequest::new("Atlantis", "Copenhagen", "2025-08-03", "2025-08-10");

    let err = generate(&maps, &request).await.unwrap_err();
    assert!(matches!(err, PlanError::LocationNotFound { ref query } if query == "Atlantis"));
}

#[tokio::test]
async fn unroutable_leg_is_kept_with_warning() {
    let maps = mock();
    let request =
        TripRequest::new("Copenhagen", "Reykjavik", "2025-08-03", "2025-08-10").with_max_stops(0);

    let itinerary = generate(&maps, &request).await.unwrap();

    assert_eq!(itinerary.legs.len(), 1);
    assert!(itinerary.legs[0].lookup_failed);
    assert!(itinerary.legs[0].distance_km.is_none());
    assert_eq!(itinerary.warnings.len(), 1);
    assert!(itinerary.warnings[0].contains("no route found"));
}

#[tokio::test]
async fn constraint_text_shared_with_endpoint_is_geocoded_once() {
    let maps = mock();
    let request = ams_to_cph()
        .with_constraints(["Amsterdam", "Germany"])
        .with_max_stops(2);

    generate(&maps, &request).await.unwrap();

    // Amsterdam, Copenhagen, Germany
    assert_eq!(maps.geocode_calls(), 3);
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let maps = RetryingMaps::with_sleeper(mock(), RetryPolicy::default(), RecordingSleeper::new());
    let config = PlannerConfig::default();
    maps.inner().fail_next(2);

    let itinerary = ItineraryGenerator::new(&maps, &config)
        .generate(&ams_to_cph().with_max_stops(0))
        .await
        .unwrap();

    assert_eq!(itinerary.stays.len(), 2);
    assert_eq!(maps.sleeper().delays().len(), 2);
}

#[tokio::test]
async fn exhausted_retries_surface_step() {
    let maps = RetryingMaps::with_sleeper(mock(), RetryPolicy::default(), RecordingSleeper::new());
    let config = PlannerConfig::default();
    maps.inner().fail_next(10);

    let err = ItineraryGenerator::new(&maps, &config)
        .generate(&ams_to_cph())
        .await
        .unwrap_err();

    assert!(matches!(err, PlanError::MappingService { step: "geocode", .. }));
    assert_eq!(maps.inner().geocode_calls(), 3);
}

/// Records the order of calls to check what happens before what.
struct TracingProvider {
    inner: MockMapsClient,
    log: Mutex<Vec<&'static str>>,
}

impl TracingProvider {
    fn new() -> Self {
        Self {
            inner: mock(),
            log: Mutex::new(Vec::new()),
        }
    }

    fn log(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().clone()
    }
}

impl MappingService for TracingProvider {
    async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, MapsError> {
        self.log.lock().unwrap().push("geocode");
        self.inner.geocode(text).await
    }

    async fn nearby_places(
        &self,
        center: &GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<GeoPoint>, MapsError> {
        self.log.lock().unwrap().push("nearby");
        self.inner.nearby_places(center, radius_km).await
    }

    async fn route(&self, from: &GeoPoint, to: &GeoPoint) -> Result<Option<RouteInfo>, MapsError> {
        self.log.lock().unwrap().push("route");
        self.inner.route(from, to).await
    }
}

#[tokio::test]
async fn call_order_follows_pipeline() {
    let maps = TracingProvider::new();
    let config = PlannerConfig::default();
    let request = ams_to_cph().with_constraints(["Germany"]).with_max_stops(2);

    ItineraryGenerator::new(&maps, &config)
        .generate(&request)
        .await
        .unwrap();

    let log = maps.log();
    assert_eq!(&log[..2], &["geocode", "geocode"]);
    // Constraint anchor is resolved after the first nearby search
    assert_eq!(log[2], "nearby");
    assert_eq!(log[3], "geocode");
    let first_route = log.iter().position(|c| *c == "route").unwrap();
    assert!(log[first_route..].iter().all(|c| *c == "route"));
    assert_eq!(log.len() - first_route, 3);
}

/// Fails geocoding of one text with a server error; everything else passes
/// through.
struct FailingGeocode {
    inner: MockMapsClient,
    text: &'static str,
}

impl MappingService for FailingGeocode {
    async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, MapsError> {
        if text.eq_ignore_ascii_case(self.text) {
            return Err(MapsError::Api {
                status: 503,
                message: "unavailable".into(),
            });
        }
        self.inner.geocode(text).await
    }

    async fn nearby_places(
        &self,
        center: &GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<GeoPoint>, MapsError> {
        self.inner.nearby_places(center, radius_km).await
    }

    async fn route(&self, from: &GeoPoint, to: &GeoPoint) -> Result<Option<RouteInfo>, MapsError> {
        self.inner.route(from, to).await
    }
}

#[tokio::test]
async fn geocode_failure_names_the_location() {
    let maps = RetryingMaps::with_sleeper(
        FailingGeocode {
            inner: mock(),
            text: "Copenhagen",
        },
        RetryPolicy::none(),
        RecordingSleeper::new(),
    );
    let config = PlannerConfig::default();

    let err = ItineraryGenerator::new(&maps, &config)
        .generate(&ams_to_cph())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PlanError::MappingService { step: "geocode", target: Some(ref t), .. } if t == "Copenhagen"
    ));
    assert!(err.to_string().contains("geocode of \"Copenhagen\""), "{err}");
}

#[tokio::test]
async fn constraint_failure_names_the_region() {
    let maps = FailingGeocode {
        inner: mock(),
        text: "Germany",
    };
    let config = PlannerConfig::default();
    let request = ams_to_cph().with_constraints(["Germany"]).with_max_stops(2);

    let err = ItineraryGenerator::new(&maps, &config)
        .generate(&request)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("constraint lookup of \"Germany\""), "{err}");
}
