use std::net::SocketAddr;

use chrono_tz::Tz;

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Upstream endpoint returning the weekly schedule as a JSON map.
    pub upstream_url: String,
    /// Seconds between background refresh attempts.
    pub refresh_interval_secs: u64,
    /// Per-request upstream timeout in seconds.
    pub fetch_timeout_secs: u64,
    /// Timezone used to resolve "today".
    pub timezone: Tz,
    /// Listen address for the HTTP API.
    pub listen: SocketAddr,
}
