use quick_xml::events::Event;
use quick_xml::reader::Reader;

use relay_core::FeedEntry;

use crate::FeedError;

/// Parse an RSS document from raw XML bytes into `(title, link)` entries.
///
/// Document order is preserved, which for RSS means newest first. Items
/// without a `<link>` are dropped; an item without a `<title>` keeps an
/// empty title rather than being dropped, since the link is the identity
/// that matters downstream.
pub fn parse_feed(xml: &[u8]) -> Result<Vec<FeedEntry>, FeedError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut buf = Vec::new();

    let mut current_item: Option<ItemBuilder> = None;
    let mut current_element = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                current_element = name.clone();
                if name == "item" {
                    current_item = Some(ItemBuilder::default());
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    if let Some(builder) = current_item.take() {
                        if let Some(entry) = builder.build() {
                            entries.push(entry);
                        }
                    }
                }
                current_element.clear();
            }
            Ok(Event::Text(e)) => {
                if let Some(ref mut item) = current_item {
                    let text = e.unescape().unwrap_or_default().to_string();
                    if !text.is_empty() {
                        item.capture(&current_element, text);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                // Feed titles are commonly CDATA-wrapped.
                if let Some(ref mut item) = current_item {
                    let text = String::from_utf8_lossy(&e).to_string();
                    if !text.is_empty() {
                        item.capture(&current_element, text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Parse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

#[derive(Default)]
struct ItemBuilder {
    title: Option<String>,
    link: Option<String>,
}

impl ItemBuilder {
    fn capture(&mut self, element: &str, text: String) {
        match element {
            "title" if self.title.is_none() => self.title = Some(text),
            "link" if self.link.is_none() => self.link = Some(text),
            _ => {}
        }
    }

    fn build(self) -> Option<FeedEntry> {
        let link = self.link?;
        Some(FeedEntry {
            title: self.title.unwrap_or_default(),
            link,
        })
    }
}
