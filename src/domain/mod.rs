use serde::{Deserialize, Serialize};

pub mod aqhi;
pub mod feed;

pub use aqhi::parse_aqhi_data;
pub use feed::{FeedItem, RssDocument};

/// Current AQHI at one monitoring station. All fields are passed through as
/// text; `aqhi_value` may be the sentinel "10+".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationReading {
    pub station: String,
    pub aqhi_value: String,
    pub risk_level: String,
    pub station_type: String,
}
