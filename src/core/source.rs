use async_trait::async_trait;

use crate::core::FeedError;
use crate::domain::RssDocument;

/// Anything that can produce the decoded AQHI feed: the live HTTP client, or
/// a fixed document in tests.
#[async_trait]
pub trait FeedSource: Send + Sync + 'static {
    async fn fetch_feed(&self) -> Result<RssDocument, FeedError>;
}
