//! Geographic point types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a new coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometres (haversine).
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlng = (other.longitude - self.longitude).to_radians();
        let s1 = (dlat / 2.0).sin();
        let s2 = (dlng / 2.0).sin();
        let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
        2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
    }

    /// Linear interpolation towards `other`.
    ///
    /// `fraction` 0.0 returns `self`, 1.0 returns `other`.
    pub fn interpolate(&self, other: &Coordinates, fraction: f64) -> Coordinates {
        Coordinates {
            latitude: self.latitude + (other.latitude - self.latitude) * fraction,
            longitude: self.longitude + (other.longitude - self.longitude) * fraction,
        }
    }

    /// How far along the straight segment `start → end` this point projects.
    ///
    /// 0.0 is at `start`, 1.0 at `end`; values outside `[0, 1]` lie before
    /// the start or past the end. Uses an equirectangular projection scaled
    /// at the segment's mean latitude, which is accurate enough for ordering
    /// stops along a trip.
    pub fn progress_along(&self, start: &Coordinates, end: &Coordinates) -> f64 {
        let mean_lat = ((start.latitude + end.latitude) / 2.0).to_radians();
        let scale = mean_lat.cos();

        let seg_x = (end.longitude - start.longitude) * scale;
        let seg_y = end.latitude - start.latitude;
        let len_sq = seg_x * seg_x + seg_y * seg_y;
        if len_sq == 0.0 {
            return 0.0;
        }

        let px = (self.longitude - start.longitude) * scale;
        let py = self.latitude - start.latitude;
        (px * seg_x + py * seg_y) / len_sq
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// A geocoded place.
///
/// Produced by the mapping service and never modified afterwards. Two points
/// are the same place when their `place_id`s are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Human-readable name (formatted address or place name).
    pub display_name: String,

    /// Country name, empty when the provider did not report one.
    pub country: String,

    pub latitude: f64,
    pub longitude: f64,

    /// Provider-specific stable identifier.
    pub place_id: String,
}

impl GeoPoint {
    /// Creates a new point.
    pub fn new(
        display_name: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
        place_id: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            country: country.into(),
            latitude,
            longitude,
            place_id: place_id.into(),
        }
    }

    /// Returns the point's coordinates.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Great-circle distance to another point in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        self.coordinates().distance_km(&other.coordinates())
    }

    /// Returns true if both points refer to the same place.
    pub fn same_place(&self, other: &GeoPoint) -> bool {
        self.place_id == other.place_id
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}
