//! Itinerary generation.
//!
//! Ties the pieces together for one request: validate, resolve the
//! endpoints, choose stops, lay out the days and look up each leg. The
//! shells call nothing else in the planner.

use tracing::info;

use crate::cache::GeocodeCache;
use crate::domain::Itinerary;
use crate::maps::MappingService;

use super::annotate::TravelAnnotator;
use super::config::PlannerConfig;
use super::error::PlanError;
use super::request::TripRequest;
use super::resolver::LocationResolver;
use super::schedule::build_schedule;
use super::stops::StopSelector;

/// Generates itineraries against a mapping service.
pub struct ItineraryGenerator<'a, M> {
    maps: &'a M,
    config: &'a PlannerConfig,
}

impl<'a, M: MappingService> ItineraryGenerator<'a, M> {
    pub fn new(maps: &'a M, config: &'a PlannerConfig) -> Self {
        Self { maps, config }
    }

    /// Build an itinerary for `request`.
    ///
    /// Input problems are reported before any call to the mapping service.
    /// Unroutable legs are kept and listed in `Itinerary::warnings`.
    pub async fn generate(&self, request: &TripRequest) -> Result<Itinerary, PlanError> {
        let trip = request.validate(self.config)?;
        info!(
            start = %trip.start,
            end = %trip.end,
            window = %trip.window,
            regions = trip.regions.len(),
            max_stops = trip.max_stops,
            "generating itinerary"
        );

        let resolver = LocationResolver::new(self.maps, GeocodeCache::new(&self.config.cache));
        let start = resolver.resolve(&trip.start).await?;
        let end = resolver.resolve(&trip.end).await?;

        if start.same_place(&end) {
            return Err(PlanError::InvalidTrip(format!(
                "{:?} and {:?} are the same place ({start})",
                trip.start, trip.end
            )));
        }

        let budget = trip.stop_budget();
        let selection = StopSelector::new(&resolver, self.config)
            .select_stops(&start, &end, budget, &trip.regions)
            .await?;

        let mut route = Vec::with_capacity(selection.stops.len() + 2);
        route.push(start);
        route.extend(selection.stops);
        route.push(end);

        let stays = build_schedule(&route, &trip.window, trip.min_stay)?;
        let annotation = TravelAnnotator::new(self.maps, self.config.travel_mode)
            .annotate(&stays)
            .await?;

        let mut warnings = selection.warnings;
        warnings.extend(annotation.warnings);

        let itinerary = Itinerary {
            trip_window: trip.window,
            stays,
            legs: annotation.legs,
            warnings,
        };

        info!(
            stays = itinerary.stays.len(),
            legs = itinerary.legs.len(),
            distance_km = itinerary.total_distance_km(),
            warnings = itinerary.warnings.len(),
            "itinerary generated"
        );
        Ok(itinerary)
    }
}
