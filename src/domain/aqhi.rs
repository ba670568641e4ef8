//! Decoding of AQHI feed items into station readings.
//!
//! A title looks like `Central/Western : 2 : Low` and a description like
//! `Central/Western - General Stations: 2 Low - Tue, 17 Jun 2025 19:30`.

use super::feed::{FeedItem, RssDocument};
use super::StationReading;

const TITLE_SEP: &str = " : ";
const DESCRIPTION_SEP: &str = " - ";
pub const UNKNOWN_STATION_TYPE: &str = "Unknown";

/// Readings for every well-formed item of the first channel, in feed order.
pub fn parse_aqhi_data(doc: &RssDocument) -> Vec<StationReading> {
    doc.items().iter().filter_map(parse_item).collect()
}

/// `None` when the title carries fewer than three fields.
pub fn parse_item(item: &FeedItem) -> Option<StationReading> {
    let mut parts = item.title().split(TITLE_SEP);
    let station = parts.next()?.trim();
    let aqhi_value = parts.next()?.trim();
    let risk_level = parts.next()?.trim();

    Some(StationReading {
        station: station.to_owned(),
        aqhi_value: aqhi_value.to_owned(),
        risk_level: risk_level.to_owned(),
        station_type: station_type(item.description()),
    })
}

fn station_type(description: &str) -> String {
    description
        .split(DESCRIPTION_SEP)
        .nth(1)
        .and_then(|type_info| {
            let mut fields = type_info.split(':');
            let kind = fields.next()?;
            fields.next().map(|_| kind.trim())
        })
        .unwrap_or(UNKNOWN_STATION_TYPE)
        .to_owned()
}
