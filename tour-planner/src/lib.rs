//! Tour planner.
//!
//! Turns "from here to there between these dates" into a day-by-day road
//! trip: intermediate stops spread along the route, stays sized to fill the
//! dates and travel legs between them, backed by Google Maps.

pub mod cache;
pub mod config;
pub mod domain;
pub mod maps;
pub mod planner;
pub mod report;
pub mod web;
