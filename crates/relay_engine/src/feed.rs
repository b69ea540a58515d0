use std::time::Duration;

use relay_core::FeedEntry;
use relay_logging::relay_debug;

use crate::error::FeedError;
use crate::rss::parse_feed;

/// Source of feed entries, newest first. An unreachable feed is an error;
/// a reachable but empty feed is `Ok(vec![])`. The orchestrator treats
/// both as "nothing to do this cycle".
#[async_trait::async_trait]
pub trait FeedReader: Send + Sync {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError>;
}

/// Fetches and parses the blog's RSS feed over HTTP.
#[derive(Debug, Clone)]
pub struct RssFeedReader {
    feed_url: String,
    client: reqwest::Client,
}

impl RssFeedReader {
    pub fn new(feed_url: impl Into<String>, user_agent: &str) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| FeedError::Network(err.to_string()))?;
        Ok(Self {
            feed_url: feed_url.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl FeedReader for RssFeedReader {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError> {
        relay_debug!("Feed URL: {}", self.feed_url);

        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await
            .map_err(|err| FeedError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Http(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| FeedError::Network(err.to_string()))?;

        let entries = parse_feed(&bytes)?;
        relay_debug!("Parsed {} entries from feed", entries.len());
        Ok(entries)
    }
}
