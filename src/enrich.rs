//! Shapes one matched stop-time update into its reportable form: calendar
//! timestamps, travel direction, and walk-reachability.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::filter::MatchedUpdate;

/// Travel direction, derived from the feed's stop-id suffix convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Uptown,
    Downtown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedUpdate {
    pub stop_id: String,
    pub stop_name: String,
    pub route_id: String,
    pub arrival_time: Option<DateTime<Utc>>,
    pub departure_time: Option<DateTime<Utc>>,
    pub direction: Direction,
    pub reachable: bool,
}

/// Derives direction from the stop-id's last character.
///
/// A trailing `'S'` means southbound, reported as downtown; anything else
/// (including lowercase `'s'`) is uptown. This is a lexical convention of
/// the feed's stop-id scheme, not geometry.
pub fn direction_of(stop_id: &str) -> Direction {
    if stop_id.ends_with('S') {
        Direction::Downtown
    } else {
        Direction::Uptown
    }
}

fn minutes(m: f64) -> Duration {
    Duration::milliseconds((m * 60_000.0).round() as i64)
}

/// Enriches one matched update. Pure: the clock and buffer are injected.
///
/// A missing arrival or departure prediction stays `None`, never a default.
/// An update is reachable when its predicted arrival is no earlier than
/// `now + buffer_minutes + walk time`; without an arrival prediction it is
/// reported unreachable.
pub fn enrich(
    matched: &MatchedUpdate<'_>,
    buffer_minutes: f64,
    now: DateTime<Utc>,
) -> EnrichedUpdate {
    let arrival_time = matched.update.arrival.and_then(|s| DateTime::from_timestamp(s, 0));
    let departure_time = matched
        .update
        .departure
        .and_then(|s| DateTime::from_timestamp(s, 0));

    let threshold = now + minutes(buffer_minutes + matched.stop.minutes_to);
    let reachable = arrival_time.map(|arrival| arrival >= threshold).unwrap_or(false);

    EnrichedUpdate {
        stop_id: matched.update.stop_id.clone(),
        stop_name: matched.stop.stop.stop_name.clone(),
        route_id: matched.entity.route_id.clone(),
        arrival_time,
        departure_time,
        direction: direction_of(&matched.update.stop_id),
        reachable,
    }
}
