//! Google Maps Platform response DTOs.
//!
//! These types map directly to the JSON returned by the Geocoding, Places
//! Nearby Search and Directions web services. Google omits fields rather
//! than sending nulls, so most of them are optional.

use serde::Deserialize;

/// Status values shared by all three web services.
pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
pub const STATUS_NOT_FOUND: &str = "NOT_FOUND";
pub const STATUS_OVER_QUERY_LIMIT: &str = "OVER_QUERY_LIMIT";
pub const STATUS_REQUEST_DENIED: &str = "REQUEST_DENIED";
pub const STATUS_INVALID_REQUEST: &str = "INVALID_REQUEST";

/// Response from `/geocode/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

/// A single geocoding match.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub place_id: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

/// One component of a structured address.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Location geometry of a result.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// A latitude/longitude literal.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Response from `/place/nearbysearch/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    pub error_message: Option<String>,
}

/// A place returned by nearby search.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    pub place_id: String,
    pub geometry: Geometry,
    /// Simplified address, e.g. "Utrecht" or "Dom Square, Utrecht".
    pub vicinity: Option<String>,
    pub plus_code: Option<PlusCode>,
}

/// Open Location Code attached to a place.
#[derive(Debug, Clone, Deserialize)]
pub struct PlusCode {
    /// e.g. "6PH57VP3+PR Utrecht, Netherlands"
    pub compound_code: Option<String>,
}

/// Response from `/directions/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
    pub error_message: Option<String>,
}

/// One alternative route.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
}

/// One leg of a route (a single origin/destination pair without waypoints).
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsLeg {
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}

/// A measured quantity with display text, e.g. `{"text": "461 km", "value": 461000}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: f64,
}
