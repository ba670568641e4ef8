use reqwest::Client;
use std::time::Instant;

use crate::core::{FeedError, FeedSource};
use crate::domain::RssDocument;
use crate::infra::config::FeedConfig;
use crate::infra::http::headers::add_standard_headers;
use crate::infra::runtime::limits::make_http_client;

/// HTTP client for the EPD AQHI RSS feed. One GET per call, no retries.
#[derive(Clone)]
pub struct AqhiFeedClient {
    url: String,
    http: Client,
}

impl AqhiFeedClient {
    pub fn from_config(cfg: &FeedConfig) -> reqwest::Result<Self> {
        let http = make_http_client(cfg)?;
        Ok(Self {
            url: cfg.url.clone(),
            http,
        })
    }

    /// Default timeouts against an explicit feed URL.
    pub fn with_url(url: impl Into<String>) -> reqwest::Result<Self> {
        Self::from_config(&FeedConfig {
            url: url.into(),
            ..FeedConfig::default()
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw feed body. Fails on transport errors and non-2xx statuses.
    pub async fn fetch_raw(&self) -> Result<String, FeedError> {
        let start = Instant::now();
        let (builder, rid) = add_standard_headers(self.http.get(&self.url), None);
        tracing::debug!(url = %self.url, request_id = %rid, "aqhi.fetch request");

        let res = read_body(builder).await;

        match &res {
            Ok(body) => {
                let elapsed_ms = start.elapsed().as_millis() as f64;
                crate::infra::logging::log_metric("aqhi.fetch", "remote_latency_ms", elapsed_ms);
                tracing::debug!(request_id = %rid, bytes = body.len(), "aqhi.fetch ok");
            }
            Err(e) => {
                crate::infra::logging::log_metric("aqhi.fetch", "remote_error_total", 1.0);
                tracing::warn!(request_id = %rid, error = %e, "aqhi.fetch failed");
            }
        }
        res
    }

    pub async fn fetch(&self) -> Result<RssDocument, FeedError> {
        let body = self.fetch_raw().await?;
        RssDocument::from_xml(&body)
    }
}

async fn read_body(builder: reqwest::RequestBuilder) -> Result<String, FeedError> {
    let resp = builder.send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FeedError::Status(status.as_u16()));
    }
    Ok(resp.text().await?)
}

#[async_trait::async_trait]
impl FeedSource for AqhiFeedClient {
    async fn fetch_feed(&self) -> Result<RssDocument, FeedError> {
        self.fetch().await
    }
}
