//! Google Maps Platform HTTP client.
//!
//! Provides async methods for the Geocoding, Places Nearby Search and
//! Directions web services, and converts their responses to domain types.

use std::collections::HashSet;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::domain::{GeoPoint, RouteInfo, TravelMode};

use super::convert::{
    Status, check_status, convert_directions, convert_geocode_result, convert_place,
};
use super::error::MapsError;
use super::service::MappingService;
use super::types::{DirectionsResponse, GeocodeResponse, NearbySearchResponse};

/// Default base URL for the Maps web services.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Nearby search rejects radii above 50 km.
const MAX_NEARBY_RADIUS_M: f64 = 50_000.0;

/// Results kept per place type in nearby search.
const RESULTS_PER_TYPE: usize = 5;

/// Configuration for the Google Maps client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Place types queried by nearby search, in priority order
    pub place_types: Vec<String>,
    /// Travel mode for route lookups
    pub travel_mode: TravelMode,
    /// Preferred result language (e.g. "en")
    pub language: Option<String>,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            place_types: vec!["locality".to_string(), "tourist_attraction".to_string()],
            travel_mode: TravelMode::Driving,
            language: Some("en".to_string()),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the place types used by nearby search.
    pub fn with_place_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.place_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the travel mode for route lookups.
    pub fn with_travel_mode(mut self, mode: TravelMode) -> Self {
        self.travel_mode = mode;
        self
    }
}

/// Google Maps web services client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    http: reqwest::Client,
    config: Arc<MapsConfig>,
    semaphore: Arc<Semaphore>,
}

impl GoogleMapsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        if config.api_key.trim().is_empty() {
            return Err(MapsError::NotConfigured(
                "GOOGLE_MAPS_API_KEY is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
            config: Arc::new(config),
        })
    }

    /// Issue a GET against one of the JSON web services.
    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &str,
        params: &[(&str, String)],
    ) -> Result<T, MapsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MapsError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}/json", self.config.base_url, service);

        let mut request = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.config.api_key.as_str())]);
        if let Some(lang) = &self.config.language {
            request = request.query(&[("language", lang.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MapsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MapsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| MapsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl MappingService for GoogleMapsClient {
    async fn geocode(&self, text: &str) -> Result<Option<GeoPoint>, MapsError> {
        let response: GeocodeResponse = self
            .get_json("geocode", &[("address", text.to_string())])
            .await?;

        if check_status(&response.status, response.error_message.as_deref())? == Status::Empty {
            debug!(query = text, "geocode returned no results");
            return Ok(None);
        }

        Ok(response.results.first().map(convert_geocode_result))
    }

    async fn nearby_places(
        &self,
        center: &GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<GeoPoint>, MapsError> {
        let radius_m = (radius_km * 1000.0).clamp(1.0, MAX_NEARBY_RADIUS_M);
        let location = center.coordinates().to_string();

        let mut seen = HashSet::new();
        let mut places = Vec::new();

        for place_type in &self.config.place_types {
            let response: NearbySearchResponse = self
                .get_json(
                    "place/nearbysearch",
                    &[
                        ("location", location.clone()),
                        ("radius", format!("{radius_m:.0}")),
                        ("type", place_type.clone()),
                    ],
                )
                .await?;

            match check_status(&response.status, response.error_message.as_deref()) {
                Ok(Status::Empty) => continue,
                Ok(Status::Ok) => {}
                // A bad place type shouldn't sink the other queries
                Err(MapsError::Api { status: 400, message }) => {
                    warn!(place_type = %place_type, %message, "nearby search rejected place type");
                    continue;
                }
                Err(e) => return Err(e),
            }

            for place in response.results.iter().take(RESULTS_PER_TYPE) {
                if seen.insert(place.place_id.clone()) {
                    places.push(convert_place(place));
                }
            }
        }

        debug!(center = %center, radius_km, found = places.len(), "nearby search");
        Ok(places)
    }

    async fn route(&self, from: &GeoPoint, to: &GeoPoint) -> Result<Option<RouteInfo>, MapsError> {
        let mode = self.config.travel_mode;
        let response: DirectionsResponse = self
            .get_json(
                "directions",
                &[
                    ("origin", format!("place_id:{}", from.place_id)),
                    ("destination", format!("place_id:{}", to.place_id)),
                    ("mode", mode.as_str().to_string()),
                ],
            )
            .await?;

        convert_directions(&response, from, to, mode)
    }
}
