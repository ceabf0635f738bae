//! Free-text location resolution.

use tracing::debug;

use crate::cache::GeocodeCache;
use crate::domain::GeoPoint;
use crate::maps::{MapsError, MappingService};

use super::error::PlanError;

/// Resolves location text to points, geocoding each distinct text once.
///
/// The cache is owned by one generation run; a resolver is never shared
/// between requests.
pub struct LocationResolver<'a, M> {
    maps: &'a M,
    cache: GeocodeCache,
}

impl<'a, M: MappingService> LocationResolver<'a, M> {
    /// Create a resolver over `maps` with its own cache.
    pub fn new(maps: &'a M, cache: GeocodeCache) -> Self {
        Self { maps, cache }
    }

    /// The mapping service behind this resolver.
    pub fn maps(&self) -> &'a M {
        self.maps
    }

    /// Geocode `text`, consulting the cache first.
    ///
    /// Returns `Ok(None)` when the provider knows no such place. Failed
    /// calls are not cached.
    pub async fn lookup(&self, text: &str) -> Result<Option<GeoPoint>, MapsError> {
        if let Some(cached) = self.cache.get(text).await {
            debug!(query = text, hit = cached.is_some(), "geocode cache hit");
            return Ok(cached);
        }

        let point = self.maps.geocode(text.trim()).await?;
        self.cache.insert(text, point.clone()).await;
        Ok(point)
    }

    /// Resolve `text` to a point, failing if nothing matches.
    pub async fn resolve(&self, text: &str) -> Result<GeoPoint, PlanError> {
        self.lookup(text)
            .await
            .map_err(PlanError::mapping_for("geocode", text.trim()))?
            .ok_or_else(|| PlanError::LocationNotFound {
                query: text.trim().to_string(),
            })
    }
}
