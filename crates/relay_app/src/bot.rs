//! Wires configuration into the engine's cycle and exposes it as a
//! periodic job.

use std::time::Duration;

use thiserror::Error;

use relay_core::PostedCache;
use relay_engine::{run_cycle, CycleSettings, RedditAuthenticator, RssFeedReader};

use crate::config::Config;
use crate::scheduler::PeriodicJob;

/// HTTP client construction failed. Only possible at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Feed(#[from] relay_engine::FeedError),
    #[error(transparent)]
    Forum(#[from] relay_engine::ForumError),
}

pub struct BotJob {
    settings: CycleSettings,
    feed: RssFeedReader,
    authenticator: RedditAuthenticator,
    cache: PostedCache,
    period: Duration,
}

impl BotJob {
    pub fn new(config: &Config) -> Result<Self, StartupError> {
        let user_agent = config.user_agent();
        let feed = RssFeedReader::new(config.feed_url(), &user_agent)?;
        let authenticator = RedditAuthenticator::new(
            config.credentials.clone(),
            config.target_subreddit.clone(),
            &user_agent,
        )?;
        Ok(Self {
            settings: CycleSettings {
                monitored_domain: config.monitored_domain.clone(),
                subreddit: config.target_subreddit.clone(),
                dry_run: config.debug,
            },
            feed,
            authenticator,
            cache: PostedCache::new(),
            period: config.polling_interval,
        })
    }
}

impl PeriodicJob for BotJob {
    fn period(&self) -> Duration {
        self.period
    }

    fn name(&self) -> &'static str {
        "relay_bot"
    }

    async fn execute(&mut self) {
        let _ = run_cycle(&self.settings, &self.feed, &self.authenticator, &mut self.cache).await;
    }
}
