//! Process configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::TravelMode;
use crate::maps::{GoogleMapsClient, MapsBackend, MapsConfig, MockMapsClient};

pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const BIND_VAR: &str = "TOUR_PLANNER_BIND";
pub const MOCK_DATA_VAR: &str = "TOUR_PLANNER_MOCK_DATA";
pub const TRAVEL_MODE_VAR: &str = "TOUR_PLANNER_TRAVEL_MODE";
pub const STATIC_DIR_VAR: &str = "TOUR_PLANNER_STATIC_DIR";
pub const PLACE_TYPES_VAR: &str = "TOUR_PLANNER_PLACE_TYPES";
pub const MAPS_BASE_URL_VAR: &str = "TOUR_PLANNER_MAPS_BASE_URL";
pub const MAX_CONCURRENT_VAR: &str = "TOUR_PLANNER_MAX_CONCURRENT";
pub const TIMEOUT_VAR: &str = "TOUR_PLANNER_TIMEOUT_SECS";

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

/// Configuration problems found at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("no mapping backend: set GOOGLE_MAPS_API_KEY or TOUR_PLANNER_MOCK_DATA")]
    NoBackend,

    #[error("failed to start mapping client: {0}")]
    Maps(#[from] crate::maps::MapsError),
}

/// Settings shared by the CLI and the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub bind: SocketAddr,
    /// Serve places from this fixture instead of calling Google.
    pub mock_data: Option<PathBuf>,
    pub travel_mode: TravelMode,
    pub static_dir: PathBuf,
    /// Google settings; `None` keeps the `MapsConfig` default.
    pub place_types: Option<Vec<String>>,
    pub maps_base_url: Option<String>,
    pub max_concurrent: Option<usize>,
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_text = get(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_text.trim().parse::<SocketAddr>().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                var: BIND_VAR,
                value: bind_text.clone(),
                reason: e.to_string(),
            }
        })?;

        let travel_mode = match get(TRAVEL_MODE_VAR) {
            Some(text) => text.parse::<TravelMode>().map_err(|reason| ConfigError::Invalid {
                var: TRAVEL_MODE_VAR,
                value: text.clone(),
                reason,
            })?,
            None => TravelMode::default(),
        };

        let place_types = get(PLACE_TYPES_VAR).map(|text| {
            text.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        let max_concurrent = match get(MAX_CONCURRENT_VAR) {
            Some(text) => Some(parse_positive(MAX_CONCURRENT_VAR, &text)? as usize),
            None => None,
        };
        let timeout_secs = match get(TIMEOUT_VAR) {
            Some(text) => Some(parse_positive(TIMEOUT_VAR, &text)?),
            None => None,
        };

        Ok(Self {
            api_key: get(API_KEY_VAR),
            bind,
            mock_data: get(MOCK_DATA_VAR).map(PathBuf::from),
            travel_mode,
            static_dir: get(STATIC_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            place_types: place_types.filter(|types| !types.is_empty()),
            maps_base_url: get(MAPS_BASE_URL_VAR),
            max_concurrent,
            timeout_secs,
        })
    }

    /// Apply command-line values on top of the environment. Blank flags are
    /// ignored like blank variables.
    pub fn with_overrides(mut self, api_key: Option<String>, mock_data: Option<PathBuf>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(path) = mock_data {
            self.mock_data = Some(path);
        }
        self
    }

    /// Build the mapping backend: the mock when a fixture is configured,
    /// otherwise the live Google client.
    pub fn maps_backend(&self) -> Result<MapsBackend, ConfigError> {
        if let Some(path) = &self.mock_data {
            return Ok(MapsBackend::Mock(MockMapsClient::new(path)?));
        }

        let key = self.api_key.as_deref().ok_or(ConfigError::NoBackend)?;
        Ok(MapsBackend::Google(GoogleMapsClient::new(self.maps_config(key))?))
    }

    /// Google client settings with any configured overrides applied.
    pub fn maps_config(&self, api_key: &str) -> MapsConfig {
        let mut config = MapsConfig::new(api_key).with_travel_mode(self.travel_mode);
        if let Some(types) = &self.place_types {
            config = config.with_place_types(types.iter().cloned());
        }
        if let Some(url) = &self.maps_base_url {
            config = config.with_base_url(url.trim_end_matches('/'));
        }
        if let Some(n) = self.max_concurrent {
            config = config.with_max_concurrent(n);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(secs);
        }
        config
    }
}

fn parse_positive(var: &'static str, text: &str) -> Result<u64, ConfigError> {
    match text.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(ConfigError::Invalid {
            var,
            value: text.to_string(),
            reason: "must be at least 1".to_string(),
        }),
        Err(e) => Err(ConfigError::Invalid {
            var,
            value: text.to_string(),
            reason: e.to_string(),
        }),
    }
}
