//! Itinerary requests and their validation.

use serde::Deserialize;

use crate::domain::{ConstraintRegion, DomainError, TripWindow, parse_trip_date};

use super::config::{DEFAULT_MAX_STOPS, DEFAULT_MIN_STAY, PlannerConfig};
use super::error::PlanError;

fn default_max_stops() -> usize {
    DEFAULT_MAX_STOPS
}

fn default_min_stay() -> u32 {
    DEFAULT_MIN_STAY
}

/// What the caller asked for, as plain text.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRequest {
    pub start: String,
    pub end: String,
    pub start_date: String,
    pub end_date: String,

    /// Regions intermediate stops must lie in. Empty means anywhere.
    #[serde(default)]
    pub constraints: Vec<String>,

    #[serde(default = "default_max_stops")]
    pub max_stops: usize,

    #[serde(default = "default_min_stay")]
    pub min_stay: u32,
}

/// A request that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedTrip {
    pub start: String,
    pub end: String,
    pub window: TripWindow,
    pub regions: Vec<ConstraintRegion>,
    pub max_stops: usize,
    pub min_stay: u32,
}

impl TripRequest {
    /// Create a request with default stop and stay settings.
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            constraints: Vec::new(),
            max_stops: DEFAULT_MAX_STOPS,
            min_stay: DEFAULT_MIN_STAY,
        }
    }

    pub fn with_constraints<S: Into<String>>(mut self, regions: impl IntoIterator<Item = S>) -> Self {
        self.constraints = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_stops(mut self, max_stops: usize) -> Self {
        self.max_stops = max_stops;
        self
    }

    pub fn with_min_stay(mut self, min_stay: u32) -> Self {
        self.min_stay = min_stay;
        self
    }

    /// Check everything that can be checked without the network.
    pub fn validate(&self, config: &PlannerConfig) -> Result<ValidatedTrip, PlanError> {
        let start = self.start.trim();
        let end = self.end.trim();

        if start.is_empty() {
            return Err(PlanError::InvalidTrip("start location is empty".to_string()));
        }
        if end.is_empty() {
            return Err(PlanError::InvalidTrip("end location is empty".to_string()));
        }
        if start.to_lowercase() == end.to_lowercase() {
            return Err(PlanError::InvalidTrip(format!(
                "start and end are the same location ({start})"
            )));
        }

        let start_date = parse_date("start_date", &self.start_date)?;
        let end_date = parse_date("end_date", &self.end_date)?;
        let window = TripWindow::new(start_date, end_date).map_err(|e| PlanError::InvalidDate {
            field: "end_date",
            value: self.end_date.trim().to_string(),
            reason: e.to_string(),
        })?;

        if self.max_stops > config.max_stops_limit {
            return Err(PlanError::InvalidTrip(format!(
                "max_stops {} exceeds the limit of {}",
                self.max_stops, config.max_stops_limit
            )));
        }
        if self.min_stay == 0 {
            return Err(PlanError::InvalidTrip(
                "min_stay must be at least 1 day".to_string(),
            ));
        }

        // Start and end need their minimum stay whatever else happens
        let total_days = window.total_days();
        if u64::from(total_days) < 2 * u64::from(self.min_stay) {
            return Err(PlanError::InsufficientDuration {
                total_days,
                stops: 2,
                min_stay: self.min_stay,
            });
        }

        Ok(ValidatedTrip {
            start: start.to_string(),
            end: end.to_string(),
            window,
            regions: ConstraintRegion::from_texts(&self.constraints[..]),
            max_stops: self.max_stops,
            min_stay: self.min_stay,
        })
    }
}

impl ValidatedTrip {
    /// How many intermediate stops the day budget can hold, capped at the
    /// requested maximum.
    pub fn stop_budget(&self) -> usize {
        let spare = self.window.total_days() - 2 * self.min_stay;
        self.max_stops.min((spare / self.min_stay) as usize)
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<chrono::NaiveDate, PlanError> {
    parse_trip_date(value).map_err(|e: DomainError| PlanError::InvalidDate {
        field,
        value: value.trim().to_string(),
        reason: e.to_string(),
    })
}
