//! Web layer for the tour planner.
//!
//! Serves the trip form and generates itineraries as JSON or HTML fragments.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
