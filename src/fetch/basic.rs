use std::time::Duration;

use async_trait::async_trait;

use super::client::HttpClient;

/// Bound on any single feed fetch; a feed that stalls past this fails the
/// run with a fetch error rather than hanging it.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("HTTP client initialization failed");
        Self(client)
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
