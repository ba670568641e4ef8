//! `get_current_aqhi`: fetch the EPD feed and decode it into station readings.

pub mod tool_router;

use serde_json::{json, Value as JsonValue};

use crate::core::{FeedError, FeedSource};
use crate::domain::{parse_aqhi_data, StationReading};

pub const TOOL_NAME: &str = "get_current_aqhi";

/// Fetch once and parse. A fetch failure is handed back untouched.
pub async fn get_current_aqhi(source: &dyn FeedSource) -> Result<Vec<StationReading>, FeedError> {
    let doc = source.fetch_feed().await?;
    let readings = parse_aqhi_data(&doc);
    crate::infra::logging::log_metric("aqhi.parse", "readings_total", readings.len() as f64);
    Ok(readings)
}

/// Tool result body: `{"readings": [...]}` or `{"error": "...", "kind": "..."}`.
pub fn to_tool_json(result: &Result<Vec<StationReading>, FeedError>) -> JsonValue {
    match result {
        Ok(readings) => json!({ "readings": readings }),
        Err(e) => json!({ "error": e.to_string(), "kind": e.kind() }),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::core::{FeedError, FeedSource};
    use crate::domain::RssDocument;

    /// Serves one canned result and counts how often it was asked.
    pub struct FixedSource {
        pub result: Result<RssDocument, FeedError>,
        pub calls: AtomicUsize,
    }

    impl FixedSource {
        pub fn xml(xml: &str) -> Self {
            Self::new(RssDocument::from_xml(xml))
        }

        pub fn new(result: Result<RssDocument, FeedError>) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FeedSource for FixedSource {
        async fn fetch_feed(&self) -> Result<RssDocument, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    pub const SAMPLE_FEED: &str = r#"
<?xml version="1.0" encoding="UTF-8"?>
<?xml-stylesheet href='style.xsl' type='text/xsl' media='screen'?>
<rss version="2.0">
   <channel>
       <title>Environmental Protection Department - AQHI</title>
       <link>http://www.aqhi.gov.hk</link>
       <image>
           <title>Environmental Protection Department - AQHI</title>
           <link>http://www.aqhi.gov.hk</link>
           <url>/epd/ddata/html/img/logo-main.png</url>
       </image>
       <description>Environmental Protection Department - AQHI</description>
       <language>en-us</language>
       <pubDate>Tue, 17 Jun 2025 19:30:00 +0800</pubDate>
       <item>
           <title>Central/Western : 2 : Low</title>
           <guid isPermaLink="true">http://www.aqhi.gov.hk/</guid>
           <link>http://www.aqhi.gov.hk</link>
           <pubDate>Tue, 17 Jun 2025 19:30:00 +0800</pubDate>
           <description>
               <![CDATA[Central/Western - General Stations: 2 Low - Tue, 17 Jun 2025 19:30]]>
           </description>
       </item>
       <item>
           <title>Southern : 2 : Low</title>
           <guid isPermaLink="true">http://www.aqhi.gov.hk/</guid>
           <link>http://www.aqhi.gov.hk</link>
           <pubDate>Tue, 17 Jun 2025 19:30:00 +0800</pubDate>
           <description>
               <![CDATA[Southern - General Stations: 2 Low - Tue, 17 Jun 2025 19:30]]>
           </description>
       </item>
   </channel>
</rss>
"#;
}
