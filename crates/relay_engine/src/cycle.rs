use relay_core::PostedCache;
use relay_logging::{relay_debug, relay_error, relay_info, relay_warn};

use crate::checker::DuplicateChecker;
use crate::feed::FeedReader;
use crate::forum::ForumAuthenticator;

/// Per-cycle settings, derived once at startup from the environment.
#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub monitored_domain: String,
    pub subreddit: String,
    /// When set, the forum handle is flipped read-only before any call,
    /// so the client itself rejects submits.
    pub dry_run: bool,
}

/// What one cycle did, for the scheduler's log line and for tests.
/// Every variant except `Posted` leaves the cache untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Feed unreachable or unparseable; retried next tick.
    FeedUnavailable,
    /// Feed fetched but had no entries.
    EmptyFeed,
    /// Could not obtain an authenticated forum handle; retried next tick.
    AuthFailed,
    /// A duplicate-check layer failed; the cycle aborts rather than risk
    /// posting with unknown duplicate-status.
    CheckAborted,
    /// The newest entry is already on the forum.
    Skipped,
    /// The newest entry was submitted. The cache now contains its URL.
    Posted,
    /// Submission failed; logged and swallowed so the service keeps
    /// running.
    SubmitFailed,
}

/// One run of the fetch → check → maybe-post cycle.
///
/// Idempotent under the duplicate-suppression guarantee: running twice on
/// the same feed state never double-posts. Only ever considers the single
/// newest entry; missed older entries are deliberately not caught up.
pub async fn run_cycle(
    settings: &CycleSettings,
    feed: &dyn FeedReader,
    authenticator: &dyn ForumAuthenticator,
    cache: &mut PostedCache,
) -> CycleOutcome {
    relay_info!("Checking feed...");

    let entries = match feed.fetch().await {
        Ok(entries) => entries,
        Err(err) => {
            relay_info!("Feed is empty or unreachable. ({err})");
            return CycleOutcome::FeedUnavailable;
        }
    };
    let Some(latest) = entries.first() else {
        relay_info!("Feed is empty or unreachable.");
        return CycleOutcome::EmptyFeed;
    };

    let mut client = match authenticator.authenticate().await {
        Ok(client) => client,
        Err(err) => {
            relay_error!("Error initializing forum client: {err}");
            return CycleOutcome::AuthFailed;
        }
    };

    if settings.dry_run {
        relay_debug!("Setting read-only mode due to dry-run flag");
        client.set_read_only(true);
    }

    let checker = DuplicateChecker::new(&settings.monitored_domain);
    match checker
        .is_already_posted(client.as_ref(), cache, &latest.link)
        .await
    {
        Ok(true) => {
            relay_info!("Skipping: '{}' (Already on Reddit)", latest.title);
            CycleOutcome::Skipped
        }
        Ok(false) => {
            relay_info!("New post found: {}", latest.title);
            match client.submit(&latest.title, &latest.link).await {
                Ok(submission) => {
                    // Cache before anything else: the next cycle's listing
                    // check may not reflect this post yet.
                    cache.insert(&latest.link);
                    relay_info!("Posted: {}", submission.permalink);

                    match client.distinguish(&submission.id).await {
                        Ok(()) => relay_info!("Successfully distinguished as Mod."),
                        Err(err) => relay_warn!("Could not distinguish post: {err}"),
                    }
                    CycleOutcome::Posted
                }
                Err(err) => {
                    relay_error!("Critical: error posting to Reddit: {err}");
                    relay_debug!("Content:\nTitle:{}\nURL:{}", latest.title, latest.link);
                    CycleOutcome::SubmitFailed
                }
            }
        }
        Err(err) => {
            relay_error!("Error checking subreddit history: {err}");
            CycleOutcome::CheckAborted
        }
    }
}
