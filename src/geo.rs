//! Great-circle distance and home-radius stop selection.

use tracing::debug;

use crate::error::{Error, Result};
use crate::stops::ReferenceStop;

/// Mean Earth radius in meters, as used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Selection radius around the home location, in meters.
pub const RADIUS_METERS: f64 = 1000.0;

/// A reference stop that passed the home-radius filter.
#[derive(Debug, Clone)]
pub struct SelectedStop {
    pub stop: ReferenceStop,
    pub distance_meters: f64,
    /// Estimated walk time from home, `distance_meters / walking_speed`.
    pub minutes_to: f64,
}

/// Haversine great-circle distance in meters between two coordinates given
/// in degrees.
///
/// Sphere approximation; at the ~1 km scales this tool filters on, the error
/// is negligible.
///
/// # Errors
///
/// Returns [`Error::Validation`] if any coordinate is NaN or infinite.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
    for (name, value) in [("lat1", lat1), ("lon1", lon1), ("lat2", lat2), ("lon2", lon2)] {
        if !value.is_finite() {
            return Err(Error::Validation(format!("{name} is not a number: {value}")));
        }
    }

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Ok(EARTH_RADIUS_METERS * c)
}

/// Selects the reference stops within `radius_meters` of the home location,
/// annotated with distance and walk time.
///
/// Only rows with an empty `parent_station` are considered. Output order
/// follows input order; downstream first-match tie-breaking relies on that
/// being stable.
pub fn select_stops(
    stops: &[ReferenceStop],
    home_lat: f64,
    home_lon: f64,
    radius_meters: f64,
    walking_speed: f64,
) -> Result<Vec<SelectedStop>> {
    let mut selected = Vec::new();

    for stop in stops {
        if !stop.parent_station.is_empty() {
            continue;
        }

        let distance = distance_meters(home_lat, home_lon, stop.stop_lat, stop.stop_lon)?;
        if distance <= radius_meters {
            selected.push(SelectedStop {
                stop: stop.clone(),
                distance_meters: distance,
                minutes_to: distance / walking_speed,
            });
        }
    }

    debug!(
        considered = stops.len(),
        selected = selected.len(),
        radius_meters,
        "Stop radius filter applied"
    );
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, name: &str, lat: f64, lon: f64, parent: &str) -> ReferenceStop {
        ReferenceStop {
            stop_id: id.to_string(),
            stop_name: name.to_string(),
            stop_lat: lat,
            stop_lon: lon,
            parent_station: parent.to_string(),
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let d = distance_meters(40.700, -73.950, 40.700, -73.950).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let ab = distance_meters(40.700, -73.950, 40.717, -73.956).unwrap();
        let ba = distance_meters(40.717, -73.956, 40.700, -73.950).unwrap();
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_distance_known_value() {
        // One degree of latitude is ~111.2 km on a 6371 km sphere
        let d = distance_meters(40.0, -73.0, 41.0, -73.0).unwrap();
        assert!((d - 111_194.9).abs() < 100.0, "got {d}");
    }

    #[test]
    fn test_nan_coordinate_is_validation_error() {
        let result = distance_meters(f64::NAN, -73.950, 40.700, -73.950);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_select_stops_empty_input() {
        let selected = select_stops(&[], 40.700, -73.950, RADIUS_METERS, 80.0).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn test_select_stops_excludes_child_records() {
        let stops = vec![
            stop("L01", "Bedford Av", 40.701, -73.951, ""),
            stop("L01N", "Bedford Av", 40.701, -73.951, "L01"),
        ];

        let selected = select_stops(&stops, 40.700, -73.950, RADIUS_METERS, 80.0).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].stop.stop_id, "L01");
    }

    #[test]
    fn test_select_stops_excludes_out_of_radius() {
        let stops = vec![
            stop("L01", "Bedford Av", 40.701, -73.951, ""),
            stop("L05", "Myrtle-Wyckoff", 40.699, -73.911, ""),
        ];

        let selected = select_stops(&stops, 40.700, -73.950, RADIUS_METERS, 80.0).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].stop.stop_id, "L01");
    }

    #[test]
    fn test_select_stops_radius_boundary_inclusive() {
        let stops = vec![stop("L01", "Bedford Av", 40.701, -73.951, "")];
        let d = distance_meters(40.700, -73.950, 40.701, -73.951).unwrap();

        // Exactly at the boundary: radius == distance is selected
        let at = select_stops(&stops, 40.700, -73.950, d, 80.0).unwrap();
        assert_eq!(at.len(), 1);

        // Just inside the boundary: not selected
        let under = select_stops(&stops, 40.700, -73.950, d - 0.001, 80.0).unwrap();
        assert!(under.is_empty());
    }

    #[test]
    fn test_minutes_to_arithmetic() {
        let stops = vec![stop("L01", "Bedford Av", 40.701, -73.951, "")];
        let selected = select_stops(&stops, 40.700, -73.950, RADIUS_METERS, 80.0).unwrap();

        let expected =
            distance_meters(40.700, -73.950, 40.701, -73.951).unwrap() / 80.0;
        assert!((selected[0].minutes_to - expected).abs() < 1e-12);
    }
}
