//! Intersects decoded stop-time updates with the selected stop set.

use crate::geo::SelectedStop;
use crate::parser::{RawStopTimeUpdate, TripUpdateEntity};

/// One stop-time update matched to the trip it belongs to and the selected
/// stop it matched.
#[derive(Debug, Clone, Copy)]
pub struct MatchedUpdate<'a> {
    pub update: &'a RawStopTimeUpdate,
    pub entity: &'a TripUpdateEntity,
    pub stop: &'a SelectedStop,
}

/// Keeps only the stop-time updates that belong to a selected stop.
///
/// A feed stop-id matches a selected stop when it *contains* the selected
/// stop's id as a substring: feeds append platform/direction suffixes, so
/// `"L01N"` matches reference stop `"L01"`. When several selected stops
/// satisfy containment, the first one in selection order wins. Updates with
/// no match are dropped silently.
///
/// Nested scan over updates x stops; the stop set is a handful of stations
/// around home, so quadratic cost is irrelevant here.
pub fn filter_updates<'a>(
    entities: &'a [TripUpdateEntity],
    selected: &'a [SelectedStop],
) -> Vec<MatchedUpdate<'a>> {
    let mut matched = Vec::new();

    for entity in entities {
        for update in &entity.stop_time_updates {
            if let Some(stop) = selected
                .iter()
                .find(|stop| update.stop_id.contains(&stop.stop.stop_id))
            {
                matched.push(MatchedUpdate { update, entity, stop });
            }
        }
    }

    matched
}
