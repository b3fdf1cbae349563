//! Runs the full pipeline for one report: fetch each configured feed,
//! decode, filter against the selected stops, enrich, then group.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::enrich::enrich;
use crate::error::Result;
use crate::fetch::{HttpClient, fetch_bytes};
use crate::filter::filter_updates;
use crate::geo::SelectedStop;
use crate::parser::parse_feed;
use crate::report::{StationReport, group_by_station};

/// Produces one grouped departure report covering every configured feed.
///
/// Sources are processed in list order and every source's result is
/// included. Fail-fast: the first fetch or decode failure aborts the run;
/// no partial report is emitted.
pub async fn run<C: HttpClient>(
    client: &C,
    feed_urls: &[String],
    selected: &[SelectedStop],
    buffer_minutes: f64,
    now: DateTime<Utc>,
) -> Result<BTreeMap<String, StationReport>> {
    let mut enriched = Vec::new();

    for url in feed_urls {
        let bytes = fetch_bytes(client, url).await?;
        debug!(url, bytes = bytes.len(), "Feed bytes received, decoding");

        let entities = parse_feed(&bytes)?;
        let matched = filter_updates(&entities, selected);
        info!(
            url,
            entities = entities.len(),
            matched = matched.len(),
            "Feed decoded and filtered"
        );

        enriched.extend(matched.iter().map(|m| enrich(m, buffer_minutes, now)));
    }

    group_by_station(enriched, selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stops::ReferenceStop;
    use async_trait::async_trait;
    use chrono::TimeZone;

    /// Serves one canned body per URL, keyed by path suffix.
    struct CannedClient(Vec<(&'static str, Vec<u8>)>);

    #[async_trait]
    impl HttpClient for CannedClient {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            let body = self
                .0
                .iter()
                .find(|(suffix, _)| req.url().path().ends_with(suffix))
                .map(|(_, body)| body.clone())
                .unwrap_or_default();
            Ok(http::Response::new(body).into())
        }
    }

    fn selected(id: &str, name: &str) -> SelectedStop {
        SelectedStop {
            stop: ReferenceStop {
                stop_id: id.to_string(),
                stop_name: name.to_string(),
                stop_lat: 0.0,
                stop_lon: 0.0,
                parent_station: String::new(),
            },
            distance_meters: 400.0,
            minutes_to: 5.0,
        }
    }

    fn feed(route: &str, stop_id: &str, arrival: i64) -> Vec<u8> {
        use crate::gtfs_rt::*;
        use prost::Message;

        FeedMessage {
            header: Some(FeedHeader {
                gtfs_realtime_version: Some("2.0".to_string()),
                timestamp: Some(arrival as u64),
            }),
            entity: vec![FeedEntity {
                id: Some("1".to_string()),
                is_deleted: None,
                trip_update: Some(TripUpdate {
                    trip: Some(TripDescriptor {
                        trip_id: Some(format!("{route}-1")),
                        start_time: None,
                        start_date: None,
                        route_id: Some(route.to_string()),
                    }),
                    stop_time_update: vec![StopTimeUpdate {
                        stop_sequence: Some(1),
                        arrival: Some(StopTimeEvent {
                            delay: None,
                            time: Some(arrival),
                            uncertainty: None,
                        }),
                        departure: None,
                        stop_id: Some(stop_id.to_string()),
                    }],
                    timestamp: None,
                }),
            }],
        }
        .encode_to_vec()
    }

    #[tokio::test]
    async fn test_all_sources_contribute_to_one_report() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let client = CannedClient(vec![
            ("/l", feed("L", "L01N", now.timestamp() + 1200)),
            ("/g", feed("G", "G26S", now.timestamp() + 1200)),
        ]);
        let stops = [selected("L01", "Bedford Av"), selected("G26", "Greenpoint Av")];
        let urls = vec![
            "http://feeds.test/l".to_string(),
            "http://feeds.test/g".to_string(),
        ];

        let report = run(&client, &urls, &stops, 2.0, now).await.unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report["Bedford Av"].updates[0].route_id, "L");
        assert_eq!(report["Greenpoint Av"].updates[0].route_id, "G");
    }

    #[tokio::test]
    async fn test_decode_failure_aborts_run() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let client = CannedClient(vec![
            ("/l", feed("L", "L01N", now.timestamp() + 1200)),
            ("/bad", vec![0xFF, 0xFE, 0x00, 0x01]),
        ]);
        let stops = [selected("L01", "Bedford Av")];
        let urls = vec![
            "http://feeds.test/l".to_string(),
            "http://feeds.test/bad".to_string(),
        ];

        let result = run(&client, &urls, &stops, 2.0, now).await;
        assert!(matches!(result, Err(crate::Error::Decode(_))));
    }

    #[tokio::test]
    async fn test_no_feeds_yield_empty_report() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let client = CannedClient(vec![]);
        let stops = [selected("L01", "Bedford Av")];

        let report = run(&client, &[], &stops, 2.0, now).await.unwrap();
        assert!(report.is_empty());
    }
}
