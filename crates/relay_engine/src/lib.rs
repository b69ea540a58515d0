//! Relay engine: feed and forum collaborators plus the duplicate-check
//! and cycle logic that drives them.
mod checker;
mod cycle;
mod error;
mod feed;
mod forum;
mod reddit;
mod rss;

pub use checker::{DuplicateChecker, RECENT_LISTING_LIMIT};
pub use cycle::{run_cycle, CycleOutcome, CycleSettings};
pub use error::{FeedError, ForumError};
pub use feed::{FeedReader, RssFeedReader};
pub use forum::{ForumAuthenticator, ForumClient};
pub use reddit::{
    RedditAuthenticator, RedditClient, RedditCredentials, DEFAULT_API_BASE_URL,
    DEFAULT_AUTH_BASE_URL,
};
pub use rss::parse_feed;
