//! Conversion from Google DTOs to domain types.

use tracing::debug;

use crate::domain::{GeoPoint, RouteInfo, TravelMode};

use super::error::MapsError;
use super::links::directions_url;
use super::types::{
    DirectionsResponse, GeocodeResult, PlaceResult, STATUS_INVALID_REQUEST, STATUS_NOT_FOUND,
    STATUS_OK, STATUS_OVER_QUERY_LIMIT, STATUS_REQUEST_DENIED, STATUS_ZERO_RESULTS,
};

/// Outcome of interpreting a response `status` field.
#[derive(Debug, PartialEq, Eq)]
pub enum Status {
    /// Results are present.
    Ok,
    /// The query was valid but matched nothing.
    Empty,
}

/// Map a Google `status` string to success, "no results", or an error.
pub fn check_status(status: &str, error_message: Option<&str>) -> Result<Status, MapsError> {
    let message = || error_message.unwrap_or(status).to_string();
    match status {
        STATUS_OK => Ok(Status::Ok),
        STATUS_ZERO_RESULTS | STATUS_NOT_FOUND => Ok(Status::Empty),
        STATUS_OVER_QUERY_LIMIT => Err(MapsError::RateLimited),
        STATUS_REQUEST_DENIED => Err(MapsError::Unauthorized),
        STATUS_INVALID_REQUEST => Err(MapsError::Api {
            status: 400,
            message: message(),
        }),
        // UNKNOWN_ERROR and anything new are treated as server-side failures
        _ => Err(MapsError::Api {
            status: 500,
            message: message(),
        }),
    }
}

/// Convert a geocoding result to a point.
pub fn convert_geocode_result(result: &GeocodeResult) -> GeoPoint {
    let country = result
        .address_components
        .iter()
        .find(|c| c.types.iter().any(|t| t == "country"))
        .map(|c| c.long_name.clone())
        .unwrap_or_default();

    GeoPoint::new(
        result.formatted_address.clone(),
        country,
        result.geometry.location.lat,
        result.geometry.location.lng,
        result.place_id.clone(),
    )
}

/// Convert a nearby-search place to a point.
///
/// Nearby search has no structured address, so the country is taken from
/// the plus code's locality suffix ("… Utrecht, Netherlands") when present.
pub fn convert_place(place: &PlaceResult) -> GeoPoint {
    let country = place
        .plus_code
        .as_ref()
        .and_then(|p| p.compound_code.as_deref())
        .and_then(country_from_compound_code)
        .unwrap_or_default();

    let display_name = match place.vicinity.as_deref() {
        Some(v) if !v.is_empty() && v != place.name => format!("{}, {}", place.name, v),
        _ => place.name.clone(),
    };

    GeoPoint::new(
        display_name,
        country,
        place.geometry.location.lat,
        place.geometry.location.lng,
        place.place_id.clone(),
    )
}

/// Extract the country from a compound plus code such as
/// `"3433+7H Utrecht, Netherlands"`.
fn country_from_compound_code(code: &str) -> Option<String> {
    let (_, locality) = code.split_once(' ')?;
    let country = locality.rsplit(',').next()?.trim();
    if country.is_empty() || !locality.contains(',') {
        return None;
    }
    Some(country.to_string())
}

/// Convert a directions response to route info.
///
/// Returns `Ok(None)` when the response holds no usable leg.
pub fn convert_directions(
    response: &DirectionsResponse,
    from: &GeoPoint,
    to: &GeoPoint,
    mode: TravelMode,
) -> Result<Option<RouteInfo>, MapsError> {
    if check_status(&response.status, response.error_message.as_deref())? == Status::Empty {
        return Ok(None);
    }

    let Some(leg) = response.routes.first().and_then(|r| r.legs.first()) else {
        debug!(from = %from, to = %to, "directions response had no legs");
        return Ok(None);
    };

    let Some(distance) = &leg.distance else {
        return Ok(None);
    };

    let duration_text = leg
        .duration
        .as_ref()
        .map(|d| d.text.clone())
        .unwrap_or_else(|| "unknown".to_string());

    Ok(Some(RouteInfo {
        distance_km: distance.value / 1000.0,
        duration_text,
        directions_url: directions_url(from, to, mode),
    }))
}
