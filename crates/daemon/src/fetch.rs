use std::collections::BTreeMap;
use std::time::Duration;

use iqaamah_core::{FetchError, RawSchedule};
use reqwest::Client;

use crate::config::DaemonConfig;

/// Performs one upstream retrieval attempt.
///
/// No retry and no store access here; the refresher owns that policy.
pub struct ScheduleFetcher {
    client: Client,
    url: String,
}

impl ScheduleFetcher {
    pub fn new(config: &DaemonConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.upstream_url.clone(),
        })
    }

    /// Single GET against the upstream, normalized into a weekly schedule.
    ///
    /// Transport errors (including the request timeout) map to `Network`,
    /// non-success statuses to `Http`, undecodable bodies to `Parse`.
    pub async fn fetch(&self) -> Result<RawSchedule, FetchError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        let body: BTreeMap<String, serde_json::Value> = resp
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        RawSchedule::from_upstream(body)
    }
}
