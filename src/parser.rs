//! Protobuf decoder for GTFS Realtime trip-update feeds.

use prost::Message;

use crate::error::Result;
use crate::gtfs_rt::FeedMessage;

/// One trip's current set of predicted stop events, as decoded from a feed.
#[derive(Debug, Clone)]
pub struct TripUpdateEntity {
    pub route_id: String,
    pub trip_id: String,
    /// In the feed's stop-sequence order, not time order across trips.
    pub stop_time_updates: Vec<RawStopTimeUpdate>,
}

/// One predicted arrival/departure event at one stop. A `None` timestamp
/// means the feed carries no prediction for that event, not "now" or zero.
#[derive(Debug, Clone)]
pub struct RawStopTimeUpdate {
    pub stop_id: String,
    pub arrival: Option<i64>,
    pub departure: Option<i64>,
}

/// Decodes a protobuf-encoded GTFS-RT feed into trip-update entities.
///
/// Entities carrying no trip-update payload (vehicle positions, alerts) are
/// skipped, not errors. Decode is all-or-nothing per buffer.
///
/// # Errors
///
/// Returns [`crate::Error::Decode`] if the bytes are not valid protobuf for
/// a `FeedMessage`; no partial result is usable in that case.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<TripUpdateEntity>> {
    let feed = FeedMessage::decode(bytes)?;

    let entities = feed
        .entity
        .into_iter()
        .filter_map(|entity| entity.trip_update)
        .map(|trip_update| {
            let trip = trip_update.trip.unwrap_or_default();
            TripUpdateEntity {
                route_id: trip.route_id.unwrap_or_default(),
                trip_id: trip.trip_id.unwrap_or_default(),
                stop_time_updates: trip_update
                    .stop_time_update
                    .into_iter()
                    .map(|update| RawStopTimeUpdate {
                        stop_id: update.stop_id.unwrap_or_default(),
                        arrival: update.arrival.and_then(|event| event.time),
                        departure: update.departure.and_then(|event| event.time),
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(entities)
}
