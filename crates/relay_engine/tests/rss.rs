use std::sync::Once;

use pretty_assertions::assert_eq;
use relay_core::FeedEntry;
use relay_engine::{parse_feed, FeedError, FeedReader, RssFeedReader};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(relay_logging::initialize_for_tests);
}

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example Blog</title>
    <link>https://example.com/blog</link>
    <item>
      <title><![CDATA[Newest & Greatest]]></title>
      <link>https://example.com/blog/post2</link>
      <description>second post</description>
    </item>
    <item>
      <title>First post</title>
      <link>https://example.com/blog/post1/</link>
    </item>
  </channel>
</rss>
"#;

#[test]
fn parses_items_in_document_order() {
    init_logging();
    let entries = parse_feed(FEED.as_bytes()).unwrap();
    assert_eq!(
        entries,
        vec![
            FeedEntry {
                title: "Newest & Greatest".to_owned(),
                link: "https://example.com/blog/post2".to_owned(),
            },
            FeedEntry {
                title: "First post".to_owned(),
                link: "https://example.com/blog/post1/".to_owned(),
            },
        ]
    );
}

#[test]
fn channel_title_is_not_mistaken_for_an_item() {
    init_logging();
    let entries = parse_feed(FEED.as_bytes()).unwrap();
    assert!(entries.iter().all(|entry| entry.title != "Example Blog"));
}

#[test]
fn item_without_link_is_dropped() {
    init_logging();
    let xml = r#"<rss><channel>
        <item><title>No link here</title></item>
        <item><title>Good</title><link>https://example.com/blog/post1</link></item>
    </channel></rss>"#;

    let entries = parse_feed(xml.as_bytes()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Good");
}

#[test]
fn empty_channel_parses_to_no_entries() {
    init_logging();
    let xml = "<rss><channel><title>Empty</title></channel></rss>";
    assert_eq!(parse_feed(xml.as_bytes()).unwrap(), Vec::new());
}

#[test]
fn malformed_xml_is_a_parse_error() {
    init_logging();
    let err = parse_feed(b"<rss><channel></item></rss>").unwrap_err();
    assert!(matches!(err, FeedError::Parse(_)));
}

#[tokio::test]
async fn reader_fetches_and_parses_over_http() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/rss"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FEED, "application/rss+xml"))
        .mount(&server)
        .await;

    let reader = RssFeedReader::new(format!("{}/blog/rss", server.uri()), "example.comBot/1.0")
        .expect("build reader");
    let entries = reader.fetch().await.expect("fetch ok");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].link, "https://example.com/blog/post2");
}

#[tokio::test]
async fn reader_reports_http_status_errors() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/rss"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let reader = RssFeedReader::new(format!("{}/blog/rss", server.uri()), "example.comBot/1.0")
        .expect("build reader");
    let err = reader.fetch().await.unwrap_err();
    assert_eq!(err, FeedError::Http(404));
}
