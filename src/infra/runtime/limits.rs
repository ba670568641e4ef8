use std::time::Duration;

use crate::infra::config::FeedConfig;

/// Build a reqwest client with the feed's connect and total timeouts.
pub fn make_http_client(cfg: &FeedConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .build()
}
