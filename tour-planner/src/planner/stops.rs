//! Intermediate stop selection.
//!
//! Stops are placed at evenly spaced targets on the straight line from
//! start to end. For each target we ask the provider for nearby places and
//! keep the eligible candidate closest to the target:
//!
//! - not the start, end or an already chosen stop (by place ID)
//! - not within `min_endpoint_distance_km` of the start or end
//! - strictly between start and end when projected onto the route
//! - inside the constraint regions, if any
//!
//! A target with no eligible candidate is skipped.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::domain::{ConstraintRegion, Coordinates, GeoPoint};
use crate::maps::MappingService;

use super::config::PlannerConfig;
use super::constraints::ConstraintFilter;
use super::error::PlanError;
use super::resolver::LocationResolver;

/// Stops chosen for a trip, plus non-fatal notes.
#[derive(Debug, Clone, Default)]
pub struct StopSelection {
    /// Intermediate stops in route order (start and end excluded).
    pub stops: Vec<GeoPoint>,
    pub warnings: Vec<String>,
}

/// Evenly spaced target positions along `start → end`.
///
/// Target `i` (1-based) sits at fraction `i / (count + 1)`.
pub fn target_positions(start: &GeoPoint, end: &GeoPoint, count: usize) -> Vec<Coordinates> {
    let (a, b) = (start.coordinates(), end.coordinates());
    (1..=count)
        .map(|i| a.interpolate(&b, i as f64 / (count + 1) as f64))
        .collect()
}

/// Chooses intermediate stops for a trip.
pub struct StopSelector<'r, 'a, M> {
    resolver: &'r LocationResolver<'a, M>,
    config: &'r PlannerConfig,
}

impl<'r, 'a, M: MappingService> StopSelector<'r, 'a, M> {
    pub fn new(resolver: &'r LocationResolver<'a, M>, config: &'r PlannerConfig) -> Self {
        Self { resolver, config }
    }

    /// Pick up to `max_stops` stops between `start` and `end`.
    ///
    /// Constraint anchors are only geocoded once a candidate actually needs
    /// testing against them.
    pub async fn select_stops(
        &self,
        start: &GeoPoint,
        end: &GeoPoint,
        max_stops: usize,
        regions: &[ConstraintRegion],
    ) -> Result<StopSelection, PlanError> {
        if start.same_place(end) {
            return Err(PlanError::InvalidTrip(format!(
                "start and end are the same place ({start})"
            )));
        }

        let mut selection = StopSelection::default();
        if max_stops == 0 {
            return Ok(selection);
        }

        let (a, b) = (start.coordinates(), end.coordinates());
        let mut taken: HashSet<String> = [start.place_id.clone(), end.place_id.clone()].into();
        let mut filter: Option<ConstraintFilter> = None;
        let mut chosen: Vec<(f64, GeoPoint)> = Vec::new();

        for (i, target) in target_positions(start, end, max_stops).into_iter().enumerate() {
            let center = GeoPoint::new(
                format!("target {}", i + 1),
                "",
                target.latitude,
                target.longitude,
                "",
            );

            let candidates = self
                .resolver
                .maps()
                .nearby_places(&center, self.config.search_radius_km)
                .await
                .map_err(PlanError::mapping_for("nearby search", target.to_string()))?;

            let mut best: Option<(f64, f64, GeoPoint)> = None;

            for candidate in candidates {
                if taken.contains(&candidate.place_id) {
                    continue;
                }
                if candidate.distance_km(start) < self.config.min_endpoint_distance_km
                    || candidate.distance_km(end) < self.config.min_endpoint_distance_km
                {
                    continue;
                }

                let progress = candidate.coordinates().progress_along(&a, &b);
                if progress <= 0.0 || progress >= 1.0 {
                    continue;
                }

                if !regions.is_empty() {
                    if filter.is_none() {
                        filter = Some(
                            ConstraintFilter::materialize(
                                self.resolver,
                                regions,
                                self.config.constraint_radius_km,
                                &mut selection.warnings,
                            )
                            .await?,
                        );
                    }
                    if !filter.as_ref().is_some_and(|f| f.matches(&candidate)) {
                        continue;
                    }
                }

                let distance = candidate.coordinates().distance_km(&target);
                if best.as_ref().is_none_or(|(d, _, _)| distance < *d) {
                    best = Some((distance, progress, candidate));
                }
            }

            match best {
                Some((distance, progress, stop)) => {
                    debug!(target = i + 1, stop = %stop, distance_km = distance, "stop chosen");
                    taken.insert(stop.place_id.clone());
                    chosen.push((progress, stop));
                }
                None => debug!(target = i + 1, "no eligible stop near target"),
            }
        }

        chosen.sort_by(|x, y| x.0.total_cmp(&y.0));
        selection.stops = chosen.into_iter().map(|(_, stop)| stop).collect();

        info!(
            requested = max_stops,
            found = selection.stops.len(),
            "stops selected"
        );
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::GeocodeCache;
    use crate::maps::MockMapsClient;

    fn mock() -> MockMapsClient {
        MockMapsClient::new("data/mock_places.json").unwrap()
    }

    async fn endpoints(maps: &MockMapsClient) -> (GeoPoint, GeoPoint) {
        let ams = maps.geocode("Amsterdam").await.unwrap().unwrap();
        let cph = maps.geocode("Copenhagen").await.unwrap().unwrap();
        (ams, cph)
    }

    #[test]
    fn targets_are_evenly_spaced() {
        let a = GeoPoint::new("A", "", 0.0, 0.0, "a");
        let b = GeoPoint::new("B", "", 0.0, 4.0, "b");

        let targets = target_positions(&a, &b, 3);
        let lngs: Vec<f64> = targets.iter().map(|t| t.longitude).collect();
        assert_eq!(lngs, vec![1.0, 2.0, 3.0]);
        assert!(target_positions(&a, &b, 0).is_empty());
    }

    #[tokio::test]
    async fn zero_stops_makes_no_calls() {
        let maps = mock();
        let (ams, cph) = endpoints(&maps).await;
        let resolver = LocationResolver::new(&maps, GeocodeCache::default());
        let config = PlannerConfig::default();

        let before = maps.call_count();
        let selection = StopSelector::new(&resolver, &config)
            .select_stops(&ams, &cph, 0, &[])
            .await
            .unwrap();

        assert!(selection.stops.is_empty());
        assert_eq!(maps.call_count(), before);
    }

    #[tokio::test]
    async fn same_place_is_invalid() {
        let maps = mock();
        let (ams, _) = endpoints(&maps).await;
        let resolver = LocationResolver::new(&maps, GeocodeCache::default());
        let config = PlannerConfig::default();

        let err = StopSelector::new(&resolver, &config)
            .select_stops(&ams, &ams.clone(), 2, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidTrip(_)));
    }

    #[tokio::test]
    async fn picks_nearest_candidates_in_route_order() {
        let maps = mock();
        let (ams, cph) = endpoints(&maps).await;
        let resolver = LocationResolver::new(&maps, GeocodeCache::default());
        let config = PlannerConfig::default();

        let selection = StopSelector::new(&resolver, &config)
            .select_stops(&ams, &cph, 2, &[])
            .await
            .unwrap();

        let ids: Vec<&str> = selection.stops.iter().map(|s| s.place_id.as_str()).collect();
        assert_eq!(ids, vec!["emden", "eckernfoerde"]);
    }

    #[tokio::test]
    async fn never_exceeds_max_and_never_duplicates() {
        let maps = mock();
        let (ams, cph) = endpoints(&maps).await;
        let resolver = LocationResolver::new(&maps, GeocodeCache::default());
        let config = PlannerConfig::default();

        for max_stops in 1..=8 {
            let selection = StopSelector::new(&resolver, &config)
                .select_stops(&ams, &cph, max_stops, &[])
                .await
                .unwrap();

            assert!(selection.stops.len() <= max_stops);

            let mut ids: HashSet<&str> = HashSet::from([ams.place_id.as_str(), cph.place_id.as_str()]);
            for stop in &selection.stops {
                assert!(ids.insert(stop.place_id.as_str()), "duplicate {stop}");
            }

            let progress: Vec<f64> = selection
                .stops
                .iter()
                .map(|s| s.coordinates().progress_along(&ams.coordinates(), &cph.coordinates()))
                .collect();
            assert!(progress.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[tokio::test]
    async fn constraints_restrict_candidates() {
        let maps = mock();
        let (ams, cph) = endpoints(&maps).await;
        let resolver = LocationResolver::new(&maps, GeocodeCache::default());
        let config = PlannerConfig::default();

        let selection = StopSelector::new(&resolver, &config)
            .select_stops(&ams, &cph, 2, &ConstraintRegion::from_texts(&["Kiel"]))
            .await
            .unwrap();

        // Only the second target has a candidate within reach of Kiel
        let ids: Vec<&str> = selection.stops.iter().map(|s| s.place_id.as_str()).collect();
        assert_eq!(ids, vec!["eckernfoerde"]);
    }

    #[tokio::test]
    async fn anchors_resolved_lazily_once() {
        let maps = mock();
        let (ams, cph) = endpoints(&maps).await;
        let resolver = LocationResolver::new(&maps, GeocodeCache::default());
        let config = PlannerConfig::default();
        let regions = ConstraintRegion::from_texts(&["Netherlands", "Germany"]);

        let before = maps.geocode_calls();
        StopSelector::new(&resolver, &config)
            .select_stops(&ams, &cph, 0, &regions)
            .await
            .unwrap();
        assert_eq!(maps.geocode_calls(), before);

        StopSelector::new(&resolver, &config)
            .select_stops(&ams, &cph, 2, &regions)
            .await
            .unwrap();
        assert_eq!(maps.geocode_calls(), before + 2);
    }

    #[tokio::test]
    async fn unmatched_constraint_yields_no_stops() {
        let maps = mock();
        let (ams, cph) = endpoints(&maps).await;
        let resolver = LocationResolver::new(&maps, GeocodeCache::default());
        let config = PlannerConfig::default();

        let selection = StopSelector::new(&resolver, &config)
            .select_stops(&ams, &cph, 3, &ConstraintRegion::from_texts(&["Iceland"]))
            .await
            .unwrap();

        assert!(selection.stops.is_empty());
        assert_eq!(selection.warnings.len(), 1);
    }

    #[tokio::test]
    async fn nearby_failure_is_fatal() {
        let maps = mock();
        let (ams, cph) = endpoints(&maps).await;
        let resolver = LocationResolver::new(&maps, GeocodeCache::default());
        let config = PlannerConfig::default();

        maps.fail_next(1);
        let err = StopSelector::new(&resolver, &config)
            .select_stops(&ams, &cph, 2, &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::MappingService {
                step: "nearby search",
                ..
            }
        ));
    }
}
