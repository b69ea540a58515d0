#![allow(dead_code)]
//! Hand-rolled counting mocks for the collaborator traits.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use relay_core::{FeedEntry, Submission};
use relay_engine::{FeedError, ForumAuthenticator, ForumClient, ForumError};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(relay_logging::initialize_for_tests);
}

pub fn submission(url: &str) -> Submission {
    Submission {
        url: url.to_owned(),
        title: format!("post at {url}"),
        permalink: "/r/test_subreddit/comments/eorhm/post/".to_owned(),
        id: "t3_eorhm".to_owned(),
    }
}

pub fn entry(title: &str, link: &str) -> FeedEntry {
    FeedEntry {
        title: title.to_owned(),
        link: link.to_owned(),
    }
}

/// Call counters shared between a mock handle and the test body.
#[derive(Debug, Default)]
pub struct ForumCalls {
    pub list_recent: AtomicUsize,
    pub search: AtomicUsize,
    /// Limits passed to `list_recent`, in call order.
    pub limits: Mutex<Vec<u32>>,
    /// `(title, url)` of every submit attempt, successful or not.
    pub submit_attempts: Mutex<Vec<(String, String)>>,
    /// Ids passed to `distinguish`.
    pub distinguished: Mutex<Vec<String>>,
    pub read_only_set: AtomicBool,
}

impl ForumCalls {
    pub fn network_calls(&self) -> usize {
        self.list_recent.load(Ordering::SeqCst) + self.search.load(Ordering::SeqCst)
    }

    pub fn submit_count(&self) -> usize {
        self.submit_attempts.lock().unwrap().len()
    }
}

/// Scripted forum handle. Cloning shares the counters, so the handle a
/// mock authenticator gives out reports into the test's `ForumCalls`.
#[derive(Clone, Debug, Default)]
pub struct MockForumClient {
    pub calls: Arc<ForumCalls>,
    pub recent: Vec<Submission>,
    pub search_results: Vec<Submission>,
    pub list_error: Option<ForumError>,
    pub search_error: Option<ForumError>,
    pub submit_error: Option<ForumError>,
    pub distinguish_error: Option<ForumError>,
    pub read_only: bool,
}

impl MockForumClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ForumClient for MockForumClient {
    async fn list_recent(&self, limit: u32) -> Result<Vec<Submission>, ForumError> {
        self.calls.list_recent.fetch_add(1, Ordering::SeqCst);
        self.calls.limits.lock().unwrap().push(limit);
        if let Some(err) = &self.list_error {
            return Err(err.clone());
        }
        Ok(self.recent.clone())
    }

    async fn search(&self, _query: &str) -> Result<Vec<Submission>, ForumError> {
        self.calls.search.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.search_error {
            return Err(err.clone());
        }
        Ok(self.search_results.clone())
    }

    async fn submit(&self, title: &str, url: &str) -> Result<Submission, ForumError> {
        self.calls
            .submit_attempts
            .lock()
            .unwrap()
            .push((title.to_owned(), url.to_owned()));
        if self.read_only {
            return Err(ForumError::ReadOnly);
        }
        if let Some(err) = &self.submit_error {
            return Err(err.clone());
        }
        Ok(Submission {
            url: url.to_owned(),
            title: title.to_owned(),
            permalink: "https://redd.it/eorhm".to_owned(),
            id: "t3_eorhm".to_owned(),
        })
    }

    async fn distinguish(&self, id: &str) -> Result<(), ForumError> {
        self.calls.distinguished.lock().unwrap().push(id.to_owned());
        if let Some(err) = &self.distinguish_error {
            return Err(err.clone());
        }
        Ok(())
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        self.calls.read_only_set.store(read_only, Ordering::SeqCst);
    }
}

/// Hands out clones of a template handle, or fails authentication.
#[derive(Clone, Default)]
pub struct MockAuthenticator {
    pub client: MockForumClient,
    pub auth_error: Option<ForumError>,
    pub auth_calls: Arc<AtomicUsize>,
}

impl MockAuthenticator {
    pub fn new(client: MockForumClient) -> Self {
        Self {
            client,
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
impl ForumAuthenticator for MockAuthenticator {
    async fn authenticate(&self) -> Result<Box<dyn ForumClient>, ForumError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.auth_error {
            return Err(err.clone());
        }
        Ok(Box::new(self.client.clone()))
    }
}

/// Scripted feed source.
#[derive(Clone)]
pub struct MockFeedReader {
    pub result: Result<Vec<FeedEntry>, FeedError>,
}

impl MockFeedReader {
    pub fn with_entries(entries: Vec<FeedEntry>) -> Self {
        Self {
            result: Ok(entries),
        }
    }

    pub fn failing(err: FeedError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait::async_trait]
impl relay_engine::FeedReader for MockFeedReader {
    async fn fetch(&self) -> Result<Vec<FeedEntry>, FeedError> {
        self.result.clone()
    }
}
