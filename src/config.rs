// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::models::workout::Coordinates;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_TILE_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;
pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Settings for the map widget.
#[derive(Debug, Clone)]
pub struct MapSettings {
    /// DOM id of the element hosting the map
    pub container_id: String,
    /// Zoom used when loading the map and when moving to a workout
    pub zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            zoom: DEFAULT_MAP_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Directory for persisted workouts; `None` keeps them in memory
    pub storage_dir: Option<PathBuf>,
    /// Fixed user position; `None` means geolocation is unavailable
    pub home_position: Option<Coordinates>,
    pub map: MapSettings,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            storage_dir: None,
            home_position: Some(Coordinates::new(38.72, -9.14)),
            map: MapSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let home_position = match (env::var("HOME_LAT").ok(), env::var("HOME_LNG").ok()) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(
                parse_coordinate("HOME_LAT", &lat, 90.0)?,
                parse_coordinate("HOME_LNG", &lng, 180.0)?,
            )),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("HOME_LNG")),
            (None, Some(_)) => return Err(ConfigError::Missing("HOME_LAT")),
        };

        let zoom = match env::var("MAP_ZOOM") {
            Ok(raw) => raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|z| *z <= 19)
                .ok_or(ConfigError::Invalid("MAP_ZOOM", raw))?,
            Err(_) => DEFAULT_MAP_ZOOM,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            storage_dir: env::var("STORAGE_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            home_position,
            map: MapSettings {
                container_id: env::var("MAP_CONTAINER_ID").unwrap_or_else(|_| "map".to_string()),
                zoom,
                tile_url: env::var("TILE_URL").unwrap_or_else(|_| DEFAULT_TILE_URL.to_string()),
                tile_attribution: env::var("TILE_ATTRIBUTION")
                    .unwrap_or_else(|_| DEFAULT_TILE_ATTRIBUTION.to_string()),
            },
        })
    }
}

fn parse_coordinate(name: &'static str, raw: &str, limit: f64) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
        .ok_or_else(|| ConfigError::Invalid(name, raw.to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("HOME_LAT", "38.5");
        env::set_var("HOME_LNG", "-9.25");
        env::set_var("MAP_ZOOM", "11");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.home_position, Some(Coordinates::new(38.5, -9.25)));
        assert_eq!(config.map.zoom, 11);
        assert_eq!(config.map.container_id, "map");

        env::remove_var("HOME_LAT");
        env::remove_var("HOME_LNG");
        env::remove_var("MAP_ZOOM");
    }

    #[test]
    fn test_parse_coordinate_bounds() {
        assert_eq!(parse_coordinate("HOME_LAT", " 45 ", 90.0).unwrap(), 45.0);
        assert!(parse_coordinate("HOME_LAT", "91", 90.0).is_err());
        assert!(parse_coordinate("HOME_LAT", "NaN", 90.0).is_err());
        assert!(parse_coordinate("HOME_LAT", "north", 90.0).is_err());
    }

    #[test]
    fn test_default_map_settings() {
        let map = MapSettings::default();
        assert_eq!(map.zoom, 13);
        assert_eq!(map.tile_url, DEFAULT_TILE_URL);
    }
}
