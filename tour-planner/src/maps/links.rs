//! Google Maps URL generation.
//!
//! Builds shareable links for places and directions. Coordinates and place
//! IDs only contain URL-safe characters, so no percent-encoding is needed.

use crate::domain::{GeoPoint, TravelMode};

const PLACE_BASE_URL: &str = "https://www.google.com/maps/place/";
const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/";

/// Link to a place's page on Google Maps.
///
/// # Example
///
/// ```
/// use tour_planner::domain::GeoPoint;
/// use tour_planner::maps::place_url;
///
/// let ams = GeoPoint::new("Amsterdam", "Netherlands", 52.37, 4.90, "ChIJVXeal");
/// assert_eq!(
///     place_url(&ams),
///     "https://www.google.com/maps/place/?q=place_id:ChIJVXeal"
/// );
/// ```
pub fn place_url(point: &GeoPoint) -> String {
    format!("{PLACE_BASE_URL}?q=place_id:{}", point.place_id)
}

/// Link to turn-by-turn directions between two points.
pub fn directions_url(from: &GeoPoint, to: &GeoPoint, mode: TravelMode) -> String {
    format!(
        "{DIRECTIONS_BASE_URL}?api=1&origin={}&origin_place_id={}&destination={}&destination_place_id={}&travelmode={}",
        from.coordinates(),
        from.place_id,
        to.coordinates(),
        to.place_id,
        mode.as_str(),
    )
}
