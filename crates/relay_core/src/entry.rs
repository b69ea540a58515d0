/// A single article from the monitored feed, newest first in feed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
}

/// A link post that exists on the forum, either found by a listing or
/// search, or returned from a just-completed submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The outbound URL the post links to.
    pub url: String,
    pub title: String,
    /// Permalink to the discussion page.
    pub permalink: String,
    /// Fullname identifier used by moderator actions.
    pub id: String,
}
