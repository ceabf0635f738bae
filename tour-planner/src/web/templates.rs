//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Itinerary, ScheduledStay, TravelLeg};
use crate::report::format_distance;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the trip form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Pre-filled maximum stops
    pub max_stops: usize,
    /// Pre-filled minimum stay
    pub min_stay: u32,
    /// Upper bound for the stops field
    pub max_stops_limit: usize,
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Generated itinerary fragment.
#[derive(Template)]
#[template(path = "itinerary.html")]
pub struct ItineraryTemplate {
    pub itinerary: ItineraryView,
}

/// Error fragment shown in place of an itinerary.
#[derive(Template)]
#[template(path = "itinerary_error.html")]
pub struct ItineraryErrorTemplate {
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Itinerary view model for templates.
#[derive(Debug, Clone)]
pub struct ItineraryView {
    pub origin: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub total_days: u32,
    pub total_distance: String,
    pub stays: Vec<StayView>,
    pub legs: Vec<LegView>,
    pub warnings: Vec<String>,
}

impl ItineraryView {
    /// Create from a domain Itinerary.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let name = |p: Option<&crate::domain::GeoPoint>| {
            p.map(|p| p.display_name.clone()).unwrap_or_default()
        };

        Self {
            origin: name(itinerary.origin()),
            destination: name(itinerary.destination()),
            start_date: itinerary.trip_window.start_date().to_string(),
            end_date: itinerary.trip_window.end_date().to_string(),
            total_days: itinerary.trip_window.total_days(),
            total_distance: format!("{:.0} km", itinerary.total_distance_km()),
            stays: itinerary.stays.iter().map(StayView::from_stay).collect(),
            legs: itinerary.legs.iter().map(LegView::from_leg).collect(),
            warnings: itinerary.warnings.clone(),
        }
    }

    /// "2 stops" / "1 stop" / "direct".
    pub fn stops_summary(&self) -> String {
        match self.stays.len().saturating_sub(2) {
            0 => "direct".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{n} stops"),
        }
    }
}

/// A dated stay.
#[derive(Debug, Clone)]
pub struct StayView {
    pub name: String,
    pub country: String,
    pub arrive: String,
    pub depart: String,
    pub days: u32,
    pub map_url: String,
}

impl StayView {
    pub fn from_stay(stay: &ScheduledStay) -> Self {
        Self {
            name: stay.location.display_name.clone(),
            country: stay.location.country.clone(),
            arrive: stay.arrive.format("%a %d %b").to_string(),
            depart: stay.depart.format("%a %d %b").to_string(),
            days: stay.days,
            map_url: stay.map_url.clone(),
        }
    }

    /// "1 day" / "3 days".
    pub fn days_display(&self) -> String {
        if self.days == 1 {
            "1 day".to_string()
        } else {
            format!("{} days", self.days)
        }
    }
}

/// Travel between two stays.
#[derive(Debug, Clone)]
pub struct LegView {
    pub from: String,
    pub to: String,
    pub distance: String,
    pub duration: String,
    pub mode: String,
    pub directions_url: String,
    pub lookup_failed: bool,
}

impl LegView {
    pub fn from_leg(leg: &TravelLeg) -> Self {
        Self {
            from: leg.from.display_name.clone(),
            to: leg.to.display_name.clone(),
            distance: format_distance(leg),
            duration: leg
                .duration_text
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            mode: leg.mode.to_string(),
            directions_url: leg.directions_url.clone(),
            lookup_failed: leg.lookup_failed,
        }
    }
}
