//! Environment configuration, loaded once at startup.

use std::time::Duration;

use thiserror::Error;

use relay_engine::RedditCredentials;

pub const DEFAULT_POLLING_INTERVAL_MINUTES: u64 = 15;

/// Startup misconfiguration. Always fatal: the process exits non-zero
/// instead of retrying.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub monitored_domain: String,
    pub target_subreddit: String,
    pub polling_interval: Duration,
    /// Read-only forum handle plus debug-level logging.
    pub debug: bool,
    /// Missing credentials are not a startup error: authentication simply
    /// fails each cycle and is retried, matching the transient taxonomy.
    pub credentials: RedditCredentials,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let monitored_domain = require(&lookup, "MONITORED_DOMAIN")?;
        let target_subreddit = require(&lookup, "TARGET_SUBREDDIT")?;

        let minutes = match lookup("POLLING_INTERVAL_MINUTES") {
            None => DEFAULT_POLLING_INTERVAL_MINUTES,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "POLLING_INTERVAL_MINUTES",
                    reason: format!("expected a positive integer, got {raw:?}"),
                })?,
        };

        let debug = lookup("REDDIT_DEBUG")
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let credentials = RedditCredentials {
            client_id: lookup("REDDIT_CLIENT_ID").unwrap_or_default(),
            client_secret: lookup("REDDIT_CLIENT_SECRET").unwrap_or_default(),
            refresh_token: lookup("REDDIT_REFRESH_TOKEN").unwrap_or_default(),
        };

        Ok(Self {
            monitored_domain,
            target_subreddit,
            polling_interval: Duration::from_secs(minutes * 60),
            debug,
            credentials,
        })
    }

    pub fn feed_url(&self) -> String {
        format!("https://{}/blog/rss", self.monitored_domain)
    }

    pub fn user_agent(&self) -> String {
        format!("{}Bot/1.0", self.monitored_domain)
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}
