//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::planner::{DEFAULT_MAX_STOPS, DEFAULT_MIN_STAY, ItineraryGenerator, PlanError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/api/itinerary", post(plan_itinerary))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the trip form.
async fn index_page(State(state): State<AppState>) -> IndexTemplate {
    IndexTemplate {
        max_stops: DEFAULT_MAX_STOPS.min(state.config.max_stops_limit),
        min_stay: DEFAULT_MIN_STAY,
        max_stops_limit: state.config.max_stops_limit,
    }
}

async fn about_page() -> AboutTemplate {
    AboutTemplate
}

async fn not_found() -> (StatusCode, ErrorTemplate) {
    (
        StatusCode::NOT_FOUND,
        ErrorTemplate {
            title: "Page not found".to_string(),
            message: "There's nothing at this address.".to_string(),
        },
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Generate an itinerary.
async fn plan_itinerary(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let html = accepts_html(&headers);

    // Parse JSON manually so we can log the body on failure
    let req: ItineraryRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "rejecting itinerary request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;
    let trip = req.into_trip_request();

    info!(start = %trip.start, end = %trip.end, html, "itinerary requested");

    let generator = ItineraryGenerator::new(state.maps.as_ref(), state.config.as_ref());
    let result = generator.generate(&trip).await;

    if html {
        let (status, body) = match result {
            Ok(itinerary) => {
                let template = ItineraryTemplate {
                    itinerary: ItineraryView::from_itinerary(&itinerary),
                };
                (StatusCode::OK, template.render())
            }
            Err(e) => {
                let error = AppError::from(e);
                error.log();
                let template = ItineraryErrorTemplate {
                    message: error.message().to_string(),
                };
                (error.status(), template.render())
            }
        };
        let html = body.map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })?;

        Ok((status, Html(html)).into_response())
    } else {
        let itinerary = result?;
        Ok(Json(ItineraryResponse::new(itinerary)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::BadGateway { message }
            | AppError::Internal { message } => message,
        }
    }

    fn log(&self) {
        let status = self.status();
        if status.is_server_error() {
            warn!(%status, message = self.message(), "request failed");
        } else {
            info!(%status, message = self.message(), "request rejected");
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            e if e.is_invalid_input() => AppError::BadRequest { message },
            PlanError::LocationNotFound { .. } => AppError::NotFound { message },
            PlanError::MappingService { .. } | PlanError::RouteNotFound { .. } => {
                AppError::BadGateway { message }
            }
            _ => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let body = Json(ErrorResponse::new(self.message()));
        (status, body).into_response()
    }
}
