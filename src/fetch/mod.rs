//! HTTP fetch of raw feed bytes.
//!
//! Single attempt per source: transport failures, timeouts, and non-2xx
//! statuses all surface as [`Error::Fetch`]; there is no retry.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::error::{Error, Result};

/// Fetches the raw bytes of one feed endpoint.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let fetch_err = |message: String| Error::Fetch {
        url: url.to_string(),
        message,
    };

    let parsed = reqwest::Url::parse(url).map_err(|e| fetch_err(e.to_string()))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| fetch_err(e.to_string()))?;

    let bytes = resp.bytes().await.map_err(|e| fetch_err(e.to_string()))?;
    Ok(bytes.to_vec())
}
