use relay_core::{normalize_url, PostedCache};
use relay_logging::{relay_debug, relay_trace};

use crate::error::ForumError;
use crate::forum::ForumClient;

/// How many recent submissions the listing layer inspects.
pub const RECENT_LISTING_LIMIT: u32 = 100;

/// Layered duplicate-suppression check for one candidate URL.
///
/// Evidence sources in strict order, cheapest and most consistent first:
///
/// 1. the in-process [`PostedCache`] (free, no lag),
/// 2. a bounded newest-first listing (one round trip, strongly
///    consistent, covers posts made moments ago that search has not
///    indexed yet),
/// 3. a site-scoped full-text search (expensive, eventually consistent,
///    but reaches back past the listing window and so covers extended
///    downtime).
///
/// Each layer's blind spot is covered by the next, so the order is a
/// correctness invariant, not a tuning choice. Positive findings are
/// cached; negative findings never are, because search lag can turn a
/// "not found" into a "found" a moment later.
#[derive(Debug, Clone)]
pub struct DuplicateChecker {
    site_filter: String,
    recent_limit: u32,
}

impl DuplicateChecker {
    /// `monitored_domain` scopes the deep-search layer, e.g. `example.com`
    /// becomes the query `site:example.com`.
    pub fn new(monitored_domain: &str) -> Self {
        Self {
            site_filter: format!("site:{monitored_domain}"),
            recent_limit: RECENT_LISTING_LIMIT,
        }
    }

    /// Returns whether `candidate_url` already exists on the forum.
    ///
    /// A transport or auth error from either network layer propagates:
    /// the caller must abort the cycle rather than treat an unknown
    /// duplicate-status as "not posted".
    pub async fn is_already_posted(
        &self,
        client: &dyn ForumClient,
        cache: &mut PostedCache,
        candidate_url: &str,
    ) -> Result<bool, ForumError> {
        if cache.contains(candidate_url) {
            relay_debug!("Cache hit for {}", candidate_url);
            return Ok(true);
        }

        let recent = client.list_recent(self.recent_limit).await?;
        relay_debug!("Retrieved {} recent submissions", recent.len());
        if self.scan(&recent, candidate_url) {
            cache.insert(candidate_url);
            return Ok(true);
        }

        let found = client.search(&self.site_filter).await?;
        relay_debug!("Retrieved {} search results", found.len());
        if self.scan(&found, candidate_url) {
            cache.insert(candidate_url);
            return Ok(true);
        }

        Ok(false)
    }

    fn scan(&self, submissions: &[relay_core::Submission], candidate_url: &str) -> bool {
        let wanted = normalize_url(candidate_url);
        submissions.iter().any(|submission| {
            relay_trace!("Checking submission: {} {}", submission.url, submission.title);
            normalize_url(&submission.url) == wanted
        })
    }
}
