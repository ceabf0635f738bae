//! The mapping collaborator contract.

use crate::domain::{GeoPoint, RouteInfo};

use super::client::GoogleMapsClient;
use super::error::MapsError;
use super::mock::MockMapsClient;

/// Geocoding, places and routing as consumed by the planner.
///
/// Any provider satisfying this shape can back the planner. "No result" is
/// a normal outcome (`None` / empty), distinct from a failed call.
#[allow(async_fn_in_trait)]
pub trait MappingService {
    /// Resolve free text to a point, or `None` if nothing matches.
    async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, MapsError>;

    /// Places of interest within `radius_km` of `center`.
    async fn nearby_places(
        &self,
        center: &GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<GeoPoint>, MapsError>;

    /// Travel route between two points, or `None` if no route exists.
    async fn route(&self, from: &GeoPoint, to: &GeoPoint) -> Result<Option<RouteInfo>, MapsError>;
}

/// The mapping backend selected at startup: live Google or mock fixtures.
#[derive(Debug, Clone)]
pub enum MapsBackend {
    Google(GoogleMapsClient),
    Mock(MockMapsClient),
}

impl MapsBackend {
    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            MapsBackend::Google(_) => "google",
            MapsBackend::Mock(_) => "mock",
        }
    }
}

impl MappingService for MapsBackend {
    async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, MapsError> {
        match self {
            MapsBackend::Google(c) => c.geocode(text).await,
            MapsBackend::Mock(c) => c.geocode(text).await,
        }
    }

    async fn nearby_places(
        &self,
        center: &GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<GeoPoint>, MapsError> {
        match self {
            MapsBackend::Google(c) => c.nearby_places(center, radius_km).await,
            MapsBackend::Mock(c) => c.nearby_places(center, radius_km).await,
        }
    }

    async fn route(&self, from: &GeoPoint, to: &GeoPoint) -> Result<Option<RouteInfo>, MapsError> {
        match self {
            MapsBackend::Google(c) => c.route(from, to).await,
            MapsBackend::Mock(c) => c.route(from, to).await,
        }
    }
}
