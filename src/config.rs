//! Application configuration loaded from environment variables.
//!
//! API keys are read once at startup and kept in memory.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Maps Platform key used for geocoding and directions
    pub maps_api_key: String,
    /// Places API (New) key; usually the same project key
    pub places_api_key: String,
    /// Directory holding the persisted JSON documents
    pub data_dir: PathBuf,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            maps_api_key: "test_maps_key".to_string(),
            places_api_key: "test_places_key".to_string(),
            data_dir: PathBuf::from("data"),
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let maps_api_key = env::var("GOOGLE_MAPS_API_KEY")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("GOOGLE_MAPS_API_KEY"))?;
        if maps_api_key.is_empty() {
            return Err(ConfigError::Empty("GOOGLE_MAPS_API_KEY"));
        }

        let places_api_key = env::var("GOOGLE_PLACES_API_KEY")
            .map(|v| v.trim().to_string())
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| maps_api_key.clone());

        Ok(Self {
            maps_api_key,
            places_api_key,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Environment variable is empty: {0}")]
    Empty(&'static str),
}
