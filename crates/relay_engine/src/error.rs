use thiserror::Error;

/// Failure fetching or parsing the monitored feed. Always transient from
/// the orchestrator's point of view: log, abort the cycle, retry on the
/// next tick.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("feed request failed with http status {0}")]
    Http(u16),
    #[error("feed unreachable: {0}")]
    Network(String),
    #[error("feed parse error: {0}")]
    Parse(String),
}

/// Failure talking to the forum.
///
/// During a duplicate check any of these aborts the whole cycle: posting
/// while duplicate-status is unknown risks a real duplicate. During a
/// submit they are logged and swallowed so the service keeps running.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForumError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("forum returned http status {0}")]
    Http(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("forum api error: {0}")]
    Api(String),
    #[error("handle is read-only")]
    ReadOnly,
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ForumError {
    if err.is_timeout() {
        return ForumError::Timeout;
    }
    ForumError::Network(err.to_string())
}
