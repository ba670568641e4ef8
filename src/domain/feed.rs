//! RSS document read with quick-xml's event reader.
//!
//! Only `rss > channel > item > title|description` is collected. Missing
//! levels decode to empty, and markup nested inside a title or description
//! contributes its text. Only XML that is not well-formed is rejected.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::Reader;

use crate::core::FeedError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RssDocument {
    /// Local name of the root element.
    pub root: String,
    pub channel: Vec<Channel>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channel {
    pub item: Vec<FeedItem>,
}

/// One `<item>` of the channel. Repeated child elements are kept in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    pub title: Vec<String>,
    pub description: Vec<String>,
}

impl FeedItem {
    pub fn title(&self) -> &str {
        self.title.first().map(String::as_str).unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.first().map(String::as_str).unwrap_or("")
    }
}

impl RssDocument {
    pub fn from_xml(xml: &str) -> Result<Self, FeedError> {
        // Some servers emit whitespace ahead of the XML declaration.
        let mut reader = Reader::from_str(xml.trim_start());
        let mut builder = DocumentBuilder::default();
        loop {
            match reader.read_event()? {
                Event::Start(ref e) => builder.handle_start(e),
                Event::Empty(ref e) => {
                    builder.handle_start(e);
                    builder.handle_end();
                }
                Event::End(_) => builder.handle_end(),
                Event::Text(ref e) => builder.push_text(&e.decode()?),
                Event::CData(ref e) => builder.push_text(&e.decode()?),
                Event::GeneralRef(ref e) => builder.push_reference(e)?,
                Event::Eof => break,
                _ => {}
            }
        }
        builder.finish()
    }

    pub fn is_rss(&self) -> bool {
        self.root == "rss"
    }

    /// Items of the first channel, or nothing when the structure is absent.
    pub fn items(&self) -> &[FeedItem] {
        if !self.is_rss() {
            return &[];
        }
        self.channel
            .first()
            .map(|c| c.item.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Title,
    Description,
}

#[derive(Debug)]
struct OpenField {
    kind: FieldKind,
    depth: usize,
    text: String,
}

#[derive(Debug, Default)]
struct DocumentBuilder {
    doc: RssDocument,
    path: Vec<String>,
    field: Option<OpenField>,
}

impl DocumentBuilder {
    fn handle_start(&mut self, e: &BytesStart) {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        match (self.path.as_slice(), name.as_str()) {
            ([], _) => self.doc.root = name.clone(),
            ([_], "channel") => self.doc.channel.push(Channel::default()),
            ([_, channel], "item") if channel.as_str() == "channel" => {
                if let Some(c) = self.doc.channel.last_mut() {
                    c.item.push(FeedItem::default());
                }
            }
            ([_, channel, item], "title" | "description")
                if channel.as_str() == "channel"
                    && item.as_str() == "item"
                    && self.field.is_none() =>
            {
                let kind = if name == "title" {
                    FieldKind::Title
                } else {
                    FieldKind::Description
                };
                self.field = Some(OpenField {
                    kind,
                    depth: self.path.len() + 1,
                    text: String::new(),
                });
            }
            _ => {}
        }
        self.path.push(name);
    }

    fn handle_end(&mut self) {
        let closes_field = self
            .field
            .as_ref()
            .is_some_and(|f| f.depth == self.path.len());
        if closes_field {
            if let Some(field) = self.field.take() {
                self.store(field);
            }
        }
        self.path.pop();
    }

    /// Text counts only inside an open title or description, including any
    /// markup nested there.
    fn push_text(&mut self, text: &str) {
        if let Some(field) = self.field.as_mut() {
            field.text.push_str(text);
        }
    }

    fn push_reference(&mut self, e: &BytesRef) -> Result<(), quick_xml::Error> {
        if let Some(ch) = e.resolve_char_ref()? {
            self.push_text(ch.encode_utf8(&mut [0; 4]));
            return Ok(());
        }
        let name = e.decode()?;
        match resolve_predefined_entity(&name) {
            Some(text) => self.push_text(text),
            None => self.push_text(&format!("&{name};")),
        }
        Ok(())
    }

    fn store(&mut self, field: OpenField) {
        let Some(item) = self.doc.channel.last_mut().and_then(|c| c.item.last_mut()) else {
            return;
        };
        let text = field.text.trim().to_owned();
        match field.kind {
            FieldKind::Title => item.title.push(text),
            FieldKind::Description => item.description.push(text),
        }
    }

    fn finish(self) -> Result<RssDocument, FeedError> {
        if self.doc.root.is_empty() {
            return Err(FeedError::Malformed("document has no root element".into()));
        }
        if let Some(open) = self.path.last() {
            return Err(FeedError::Malformed(format!("unclosed element <{open}>")));
        }
        Ok(self.doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_items_with_cdata_description() {
        let xml = r#"
<?xml version="1.0" encoding="UTF-8"?>
<?xml-stylesheet href='style.xsl' type='text/xsl' media='screen'?>
<rss version="2.0">
  <channel>
    <title>Environmental Protection Department - AQHI</title>
    <image><title>logo</title><url>/logo.png</url></image>
    <item>
      <title>Tung Chung : 3 : Low</title>
      <guid isPermaLink="true">http://www.aqhi.gov.hk/</guid>
      <description>
        <![CDATA[Tung Chung - General Stations: 3 Low - Tue, 17 Jun 2025 19:30]]>
      </description>
    </item>
  </channel>
</rss>"#;
        let doc = RssDocument::from_xml(xml).unwrap();
        assert!(doc.is_rss());
        let items = doc.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title(), "Tung Chung : 3 : Low");
        assert!(items[0].description().contains("General Stations: 3 Low"));
    }

    #[test]
    fn missing_levels_decode_to_empty() {
        let doc = RssDocument::from_xml("<rss version=\"2.0\"></rss>").unwrap();
        assert!(doc.items().is_empty());

        let doc = RssDocument::from_xml("<rss><channel><title>x</title></channel></rss>").unwrap();
        assert_eq!(doc.channel.len(), 1);
        assert!(doc.items().is_empty());
    }

    #[test]
    fn item_without_children_reads_empty_strings() {
        let doc = RssDocument::from_xml("<rss><channel><item><link>x</link></item></channel></rss>")
            .unwrap();
        assert_eq!(doc.items().len(), 1);
        assert_eq!(doc.items()[0].title(), "");
        assert_eq!(doc.items()[0].description(), "");
    }

    #[test]
    fn non_rss_root_has_no_items() {
        let doc = RssDocument::from_xml(
            "<feed><channel><item><title>A : 1 : Low</title></item></channel></feed>",
        )
        .unwrap();
        assert_eq!(doc.root, "feed");
        assert!(doc.items().is_empty());
    }

    #[test]
    fn nested_markup_in_a_field_keeps_the_feed() {
        let xml = "<rss><channel>\
            <item><title>A : 1 : Low</title><description>x - T: 1<br/>more</description></item>\
            <item><title>B : 2 : Low</title><description>B - General Stations: 2 Low</description></item>\
            </channel></rss>";
        let doc = RssDocument::from_xml(xml).unwrap();
        let items = doc.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(), "A : 1 : Low");
        assert_eq!(items[0].description(), "x - T: 1more");
        assert_eq!(items[1].title(), "B : 2 : Low");
        assert_eq!(items[1].description(), "B - General Stations: 2 Low");
    }

    #[test]
    fn nested_title_element_contributes_its_text() {
        let doc = RssDocument::from_xml(
            "<rss><channel><item><title><b>Tap Mun</b> : 4 : Moderate</title></item></channel></rss>",
        )
        .unwrap();
        assert_eq!(doc.items()[0].title(), "Tap Mun : 4 : Moderate");
    }

    #[test]
    fn resolves_entity_and_character_references() {
        let doc = RssDocument::from_xml(
            "<rss><channel><item><title>Kwai Chung &amp; Tsing Yi : &#55; : High</title></item></channel></rss>",
        )
        .unwrap();
        assert_eq!(doc.items()[0].title(), "Kwai Chung & Tsing Yi : 7 : High");
    }

    #[test]
    fn empty_title_element_reads_empty() {
        let doc = RssDocument::from_xml("<rss><channel><item><title/></item></channel></rss>").unwrap();
        assert_eq!(doc.items()[0].title, vec![String::new()]);
    }

    #[test]
    fn first_of_repeated_titles_wins() {
        let doc = RssDocument::from_xml(
            "<rss><channel><item><title>A : 1 : Low</title><title>B : 2 : Low</title></item></channel></rss>",
        )
        .unwrap();
        assert_eq!(doc.items()[0].title(), "A : 1 : Low");
    }

    #[test]
    fn rejects_broken_xml() {
        let err = RssDocument::from_xml("<rss><channel></rss>").unwrap_err();
        assert_eq!(err.kind(), "malformed");

        let err = RssDocument::from_xml("").unwrap_err();
        assert_eq!(err.kind(), "malformed");

        let err = RssDocument::from_xml("<rss><channel>").unwrap_err();
        assert_eq!(err, FeedError::Malformed("unclosed element <channel>".into()));
    }
}
