//! Trip window and constraint region types.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::DomainError;

/// Date formats accepted from user input, tried in order.
///
/// Day-first numeric forms use dots so they can't be confused with the
/// US month-first slash convention.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
];

/// Parse a trip date from free text.
///
/// Accepts ISO dates (`2025-08-03`) and common written forms such as
/// `3 aug 2025` or `Aug 3, 2025`. Month names are case-insensitive.
///
/// # Examples
///
/// ```
/// use tour_planner::domain::parse_trip_date;
///
/// let a = parse_trip_date("2025-08-03").unwrap();
/// let b = parse_trip_date("3 aug 2025").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_trip_date("next tuesday").is_err());
/// ```
pub fn parse_trip_date(input: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| DomainError::UnrecognizedDate(trimmed.to_string()))
}

/// The calendar span of a trip.
///
/// `end_date` is the departure day from the final stay, so a window from
/// Aug 3 to Aug 10 is 7 days long. A `TripWindow` is always at least one
/// day long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TripWindow {
    /// Creates a window, rejecting empty or reversed ranges.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, DomainError> {
        if end_date <= start_date {
            return Err(DomainError::InvalidWindow {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of days between start and end (always ≥ 1).
    pub fn total_days(&self) -> u32 {
        // Positive by construction
        (self.end_date - self.start_date).num_days() as u32
    }

    /// The date `days` after the start.
    pub fn day(&self, days: u32) -> NaiveDate {
        self.start_date + Duration::days(i64::from(days))
    }
}

impl fmt::Display for TripWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} ({} days)",
            self.start_date,
            self.end_date,
            self.total_days()
        )
    }
}

/// A free-text filter term restricting where intermediate stops may be.
///
/// Typically a country, city or continent name. Regions carry no geometry;
/// they are matched against candidate points by the constraint filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConstraintRegion {
    raw_text: String,
}

impl ConstraintRegion {
    /// Creates a region from text, returning `None` for blank input.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                raw_text: trimmed.to_string(),
            })
        }
    }

    /// Parses a comma-separated list such as `"Netherlands, Germany"`.
    pub fn parse_list(text: &str) -> Vec<Self> {
        text.split(',').filter_map(Self::new).collect()
    }

    /// Builds regions from individual strings, dropping blanks.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Vec<Self> {
        texts.iter().filter_map(|t| Self::new(t.as_ref())).collect()
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

impl fmt::Display for ConstraintRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}
