//! Static GTFS stop reference data.
//!
//! Loads `stops.txt` once per run; the resulting sequence is immutable for
//! the rest of the run.

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// One row of the GTFS `stops.txt` dataset. Extra columns are ignored.
///
/// A row with an empty `parent_station` is a selectable leaf platform; a
/// non-empty value marks a child record grouped under a station complex.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceStop {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
    #[serde(default)]
    pub parent_station: String,
}

/// Reads all stops from a GTFS `stops.txt` CSV file (headers required).
pub fn load_stops(path: &str) -> Result<Vec<ReferenceStop>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::ReferenceData(format!("{path}: {e}")))?;

    let mut stops = Vec::new();
    for row in reader.deserialize() {
        let stop: ReferenceStop = row.map_err(|e| Error::ReferenceData(format!("{path}: {e}")))?;
        stops.push(stop);
    }

    debug!(path, count = stops.len(), "Reference stops loaded");
    Ok(stops)
}
