use relay_core::Submission;

use crate::error::ForumError;

/// Authenticated handle to the discussion forum.
///
/// The three read/write capabilities the orchestrator needs, plus the
/// read-only toggle for dry runs. Listing `/new` is strongly consistent
/// (reflects a post immediately); search is eventually consistent and may
/// lag by an unbounded but typically short duration.
#[async_trait::async_trait]
pub trait ForumClient: Send + Sync + std::fmt::Debug {
    /// The most recent link posts in the destination channel, newest first,
    /// at most `limit` of them.
    async fn list_recent(&self, limit: u32) -> Result<Vec<Submission>, ForumError>;

    /// Full-text search scoped to the destination channel, sorted newest
    /// first. The caller scans the entire returned set.
    async fn search(&self, query: &str) -> Result<Vec<Submission>, ForumError>;

    /// Submit a new link post. Must fail with [`ForumError::ReadOnly`]
    /// when the handle is read-only.
    async fn submit(&self, title: &str, url: &str) -> Result<Submission, ForumError>;

    /// Distinguish a submission as moderator-made, without pinning it.
    async fn distinguish(&self, id: &str) -> Result<(), ForumError>;

    /// Flip the handle into read-only mode. Enforcement lives in the
    /// client, not in the orchestrator.
    fn set_read_only(&mut self, read_only: bool);
}

/// Builds a fresh authenticated [`ForumClient`] handle. Called once per
/// cycle; an auth failure is transient and retried on the next tick.
#[async_trait::async_trait]
pub trait ForumAuthenticator: Send + Sync {
    async fn authenticate(&self) -> Result<Box<dyn ForumClient>, ForumError>;
}
