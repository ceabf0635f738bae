//! Day allocation across the trip's locations.
//!
//! Every location gets `min_stay` days. Days left over are split evenly,
//! and any remainder goes one day at a time to the start, then the end,
//! then intermediate stops in route order. The start and end therefore
//! never get fewer days than an intermediate stop.

use tracing::debug;

use crate::domain::{GeoPoint, ScheduledStay, TripWindow};
use crate::maps::place_url;

use super::error::PlanError;

/// Order in which locations receive remainder days.
fn remainder_priority(count: usize) -> impl Iterator<Item = usize> {
    let last = count.saturating_sub(1);
    std::iter::once(0)
        .chain((last > 0).then_some(last))
        .chain(1..last)
}

/// Days per location, in route order.
///
/// Returns `None` when `total_days` can't cover `min_stay` for each of
/// `count` locations.
pub fn allocate_days(count: usize, total_days: u32, min_stay: u32) -> Option<Vec<u32>> {
    let n = u32::try_from(count).ok()?;
    let required = n.checked_mul(min_stay)?;
    if count == 0 || total_days < required {
        return None;
    }

    let extra = total_days - required;
    let mut days = vec![min_stay + extra / n; count];
    for idx in remainder_priority(count).take((extra % n) as usize) {
        days[idx] += 1;
    }
    Some(days)
}

/// Lay the locations out as consecutive dated stays across `window`.
///
/// `locations` is the full route: start, intermediate stops, end.
pub fn build_schedule(
    locations: &[GeoPoint],
    window: &TripWindow,
    min_stay: u32,
) -> Result<Vec<ScheduledStay>, PlanError> {
    if locations.is_empty() {
        return Err(PlanError::InvalidTrip("no locations to schedule".to_string()));
    }

    let total_days = window.total_days();
    let days = allocate_days(locations.len(), total_days, min_stay).ok_or(
        PlanError::InsufficientDuration {
            total_days,
            stops: locations.len(),
            min_stay,
        },
    )?;

    let mut offset = 0;
    let stays = locations
        .iter()
        .zip(days)
        .map(|(location, days)| {
            let arrive = window.day(offset);
            offset += days;
            ScheduledStay {
                location: location.clone(),
                arrive,
                depart: window.day(offset),
                days,
                map_url: place_url(location),
            }
        })
        .collect::<Vec<_>>();

    debug!(
        locations = stays.len(),
        total_days,
        "schedule built"
    );
    Ok(stays)
}
