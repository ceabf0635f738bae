//! Plain-text rendering of an itinerary for the terminal.

use std::fmt;

use crate::domain::{Itinerary, TravelLeg};

const RULE_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 40;

/// Distance for display, e.g. "123.4 km", or "unknown" if the lookup failed.
pub fn format_distance(leg: &TravelLeg) -> String {
    leg.distance_km
        .map(|km| format!("{km:.1} km"))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Render the whole itinerary as a printable report.
pub fn render_text(itinerary: &Itinerary) -> String {
    let mut out = String::new();
    // Writing to a String can't fail
    let _ = write_report(&mut out, itinerary);
    out
}

/// Write the report to `out`, stopping at the first write error.
pub fn write_report(out: &mut impl fmt::Write, itinerary: &Itinerary) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    let section = "-".repeat(SECTION_WIDTH);

    let origin = itinerary.origin().map(|p| p.display_name.as_str()).unwrap_or("?");
    let destination = itinerary
        .destination()
        .map(|p| p.display_name.as_str())
        .unwrap_or("?");

    writeln!(out, "{rule}")?;
    writeln!(out, "TRAVEL ITINERARY")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "From: {origin}")?;
    writeln!(out, "To: {destination}")?;
    writeln!(out, "Duration: {}", itinerary.trip_window)?;
    writeln!(out)?;

    writeln!(out, "SCHEDULE:")?;
    writeln!(out, "{section}")?;
    for (i, stay) in itinerary.stays.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(
            out,
            "{} - {}: {}",
            stay.arrive, stay.depart, stay.location.display_name
        )?;
        writeln!(out, "  Days: {}", stay.days)?;
        writeln!(out, "  Google Maps: {}", stay.map_url)?;
    }

    if !itinerary.legs.is_empty() {
        writeln!(out)?;
        writeln!(out, "TRAVEL BETWEEN LOCATIONS:")?;
        writeln!(out, "{section}")?;
        for leg in &itinerary.legs {
            writeln!(out, "From: {}", leg.from.display_name)?;
            writeln!(out, "To: {}", leg.to.display_name)?;
            writeln!(out, "Distance: {}", format_distance(leg))?;
            writeln!(
                out,
                "Duration: {}",
                leg.duration_text.as_deref().unwrap_or("unknown")
            )?;
            writeln!(out, "Directions: {}", leg.directions_url)?;
            writeln!(out)?;
        }
    }

    if !itinerary.warnings.is_empty() {
        writeln!(out, "NOTES:")?;
        writeln!(out, "{section}")?;
        for warning in &itinerary.warnings {
            writeln!(out, "* {warning}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{rule}")?;
    writeln!(out, "Have a great trip!")?;
    write!(out, "{rule}")
}
