//! Groups enriched updates by station name for the final report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::enrich::EnrichedUpdate;
use crate::error::{Error, Result};
use crate::geo::SelectedStop;

/// All upcoming updates for one station, with its walk-time estimate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationReport {
    pub minutes_to: f64,
    pub updates: Vec<EnrichedUpdate>,
}

/// Groups updates by station name and attaches each station's walk time.
///
/// The key is the stop *name*, so platforms sharing a station fold into one
/// group. `minutes_to` comes from the first selected stop carrying that
/// name (selection order is stable). Within a group, updates keep the order
/// they arrived in; no sort is applied. Sorted map keys make the serialized
/// report deterministic.
///
/// # Errors
///
/// Returns [`Error::InternalInvariant`] if a grouped station name has no
/// matching selected stop. Updates sourced from the filter always carry a
/// selected stop's name, so this is unreachable in the assembled pipeline.
pub fn group_by_station(
    updates: Vec<EnrichedUpdate>,
    selected: &[SelectedStop],
) -> Result<BTreeMap<String, StationReport>> {
    let mut groups: BTreeMap<String, Vec<EnrichedUpdate>> = BTreeMap::new();
    for update in updates {
        groups.entry(update.stop_name.clone()).or_default().push(update);
    }

    groups
        .into_iter()
        .map(|(name, updates)| {
            let minutes_to = selected
                .iter()
                .find(|stop| stop.stop.stop_name == name)
                .map(|stop| stop.minutes_to)
                .ok_or_else(|| {
                    Error::InternalInvariant(format!(
                        "grouped station {name:?} is not in the selected stop set"
                    ))
                })?;
            Ok((name, StationReport { minutes_to, updates }))
        })
        .collect()
}
