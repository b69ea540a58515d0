use std::collections::HashSet;

/// Canonical form used for duplicate comparison: the URL with exactly one
/// trailing `/` removed. No scheme, host, or query canonicalization.
pub fn normalize_url(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Set of URLs confirmed posted, process lifetime only.
///
/// Invariant: every member was confirmed by a listing/search hit or by a
/// just-completed submission. Negative results are never stored; a URL
/// absent here may still exist on the forum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostedCache {
    seen: HashSet<String>,
}

impl PostedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test under [`normalize_url`] identity.
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(normalize_url(url))
    }

    /// Records a URL as posted. Returns `false` if it was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        self.seen.insert(normalize_url(url).to_owned())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
