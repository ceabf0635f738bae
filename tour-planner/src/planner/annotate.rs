//! Travel details between consecutive stays.

use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::domain::{ScheduledStay, TravelLeg, TravelMode};
use crate::maps::{MappingService, directions_url};

use super::error::PlanError;

/// Legs for a schedule, plus the ones that could not be routed.
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    pub legs: Vec<TravelLeg>,
    pub warnings: Vec<String>,
}

/// Looks up each leg of a schedule.
pub struct TravelAnnotator<'a, M> {
    maps: &'a M,
    mode: TravelMode,
}

impl<'a, M: MappingService> TravelAnnotator<'a, M> {
    pub fn new(maps: &'a M, mode: TravelMode) -> Self {
        Self { maps, mode }
    }

    /// One leg per consecutive pair of stays, looked up concurrently.
    ///
    /// A pair with no route still gets a leg (flagged, with no distance)
    /// and a warning. A provider failure aborts the whole annotation.
    pub async fn annotate(&self, stays: &[ScheduledStay]) -> Result<Annotation, PlanError> {
        let lookups = stays.windows(2).map(|pair| self.leg(&pair[0], &pair[1]));
        let results = try_join_all(lookups).await?;

        let mut annotation = Annotation::default();
        for (leg, warning) in results {
            annotation.legs.push(leg);
            annotation.warnings.extend(warning);
        }
        Ok(annotation)
    }

    async fn leg(
        &self,
        from: &ScheduledStay,
        to: &ScheduledStay,
    ) -> Result<(TravelLeg, Option<String>), PlanError> {
        let (a, b) = (&from.location, &to.location);
        let route = self
            .maps
            .route(a, b)
            .await
            .map_err(PlanError::mapping_for(
                "route",
                format!("{} to {}", a.display_name, b.display_name),
            ))?;

        match route {
            Some(mut info) => {
                // Links follow the planner's mode, whatever the provider used
                info.directions_url = directions_url(a, b, self.mode);
                debug!(from = %a, to = %b, distance_km = info.distance_km, "leg routed");
                Ok((TravelLeg::routed(a.clone(), b.clone(), info, self.mode), None))
            }
            None => {
                let missing = PlanError::RouteNotFound {
                    from: a.display_name.clone(),
                    to: b.display_name.clone(),
                };
                warn!(error = %missing, "leg left unrouted");
                let url = directions_url(a, b, self.mode);
                Ok((
                    TravelLeg::unrouted(a.clone(), b.clone(), url, self.mode),
                    Some(missing.to_string()),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, TripWindow};
    use crate::maps::MockMapsClient;
    use crate::planner::schedule::build_schedule;
    use chrono::NaiveDate;

    fn mock() -> MockMapsClient {
        MockMapsClient::new("data/mock_places.json").unwrap()
    }

    async fn stays(maps: &MockMapsClient, names: &[&str]) -> Vec<ScheduledStay> {
        let mut points: Vec<GeoPoint> = Vec::new();
        for name in names {
            points.push(maps.geocode(name).await.unwrap().unwrap());
        }
        let start = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 8, 13).unwrap();
        build_schedule(&points, &TripWindow::new(start, end).unwrap(), 1).unwrap()
    }

    #[tokio::test]
    async fn one_leg_per_pair_in_order() {
        let maps = mock();
        let stays = stays(&maps, &["Amsterdam", "Bremen", "Kiel", "Copenhagen"]).await;

        let annotation = TravelAnnotator::new(&maps, TravelMode::Driving)
            .annotate(&stays)
            .await
            .unwrap();

        assert_eq!(annotation.legs.len(), 3);
        assert!(annotation.warnings.is_empty());
        assert_eq!(maps.route_calls(), 3);

        for (leg, pair) in annotation.legs.iter().zip(stays.windows(2)) {
            assert_eq!(leg.from, pair[0].location);
            assert_eq!(leg.to, pair[1].location);
            assert!(!leg.lookup_failed);
            assert!(leg.distance_km.is_some_and(|d| d > 0.0));
        }
    }

    #[tokio::test]
    async fn unroutable_leg_is_flagged_not_fatal() {
        let maps = mock();
        let stays = stays(&maps, &["Amsterdam", "Reykjavik", "Copenhagen"]).await;

        let annotation = TravelAnnotator::new(&maps, TravelMode::Driving)
            .annotate(&stays)
            .await
            .unwrap();

        assert_eq!(annotation.legs.len(), 2);
        assert_eq!(annotation.warnings.len(), 2);
        assert!(annotation.legs.iter().all(|l| l.lookup_failed));
        assert!(annotation.legs.iter().all(|l| l.distance_km.is_none()));
        assert!(annotation.warnings[0].contains("Reykjav"));
        assert!(annotation.legs[0].directions_url.contains("origin_place_id=ams"));
    }

    #[tokio::test]
    async fn links_use_planner_travel_mode() {
        let maps = mock();
        let stays = stays(&maps, &["Bremen", "Amsterdam", "Reykjavik"]).await;

        let annotation = TravelAnnotator::new(&maps, TravelMode::Transit)
            .annotate(&stays)
            .await
            .unwrap();

        assert!(!annotation.legs[0].lookup_failed);
        assert!(annotation.legs[1].lookup_failed);
        for leg in &annotation.legs {
            assert_eq!(leg.mode, TravelMode::Transit);
            assert!(leg.directions_url.ends_with("travelmode=transit"), "{}", leg.directions_url);
        }
    }

    #[tokio::test]
    async fn provider_failure_is_fatal() {
        let maps = mock();
        let stays = stays(&maps, &["Amsterdam", "Copenhagen"]).await;

        maps.fail_next(1);
        let err = TravelAnnotator::new(&maps, TravelMode::Driving)
            .annotate(&stays)
            .await
            .unwrap_err();
        assert!(matches!(err, PlanError::MappingService { step: "route", .. }));
        assert!(err.to_string().contains("\"Amsterdam, Netherlands to Copenhagen, Denmark\""));
    }

    #[tokio::test]
    async fn single_stay_has_no_legs() {
        let maps = mock();
        let stays = stays(&maps, &["Amsterdam"]).await;

        let annotation = TravelAnnotator::new(&maps, TravelMode::Driving)
            .annotate(&stays)
            .await
            .unwrap();
        assert!(annotation.legs.is_empty());
        assert_eq!(maps.route_calls(), 0);
    }
}
