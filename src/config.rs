//! Runtime configuration loaded once at startup from a JSON file.
//!
//! Nothing reads configuration ambiently; the values here are passed down
//! through the pipeline as explicit parameters.

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub location: Location,
    /// Safety margin added on top of the walk time when deciding whether a
    /// departure is still catchable.
    pub buffer_minutes: f64,
    /// Walking speed in meters per minute.
    pub walking_speed: f64,
    /// GTFS-RT trip-update feed endpoints to poll, one report per run
    /// covering all of them.
    #[serde(default)]
    pub feeds: Vec<String>,
}

impl Config {
    /// Loads and validates the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{path}: {e}")))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{path}: {e}")))?;

        if config.walking_speed <= 0.0 || !config.walking_speed.is_finite() {
            return Err(Error::Config(format!(
                "walkingSpeed must be a positive number of meters per minute, got {}",
                config.walking_speed
            )));
        }
        if !config.buffer_minutes.is_finite() {
            return Err(Error::Config("bufferMinutes must be finite".to_string()));
        }

        Ok(config)
    }
}
