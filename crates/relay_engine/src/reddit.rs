use std::time::Duration;

use serde::Deserialize;

use relay_core::Submission;
use relay_logging::relay_debug;

use crate::error::{map_reqwest_error, ForumError};
use crate::forum::{ForumAuthenticator, ForumClient};

/// Host used for the OAuth2 token exchange.
pub const DEFAULT_AUTH_BASE_URL: &str = "https://www.reddit.com";
/// Host used for all authenticated API calls.
pub const DEFAULT_API_BASE_URL: &str = "https://oauth.reddit.com";

#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Exchanges the long-lived refresh token for a bearer token and hands out
/// a [`RedditClient`] bound to the destination subreddit. One handle is
/// built per cycle, mirroring the forum client's own session lifetime.
pub struct RedditAuthenticator {
    credentials: RedditCredentials,
    subreddit: String,
    auth_base: String,
    api_base: String,
    http: reqwest::Client,
}

impl RedditAuthenticator {
    pub fn new(
        credentials: RedditCredentials,
        subreddit: impl Into<String>,
        user_agent: &str,
    ) -> Result<Self, ForumError> {
        Self::with_base_urls(
            credentials,
            subreddit,
            user_agent,
            DEFAULT_AUTH_BASE_URL,
            DEFAULT_API_BASE_URL,
        )
    }

    /// Same as [`RedditAuthenticator::new`] but with injectable hosts, so
    /// tests can point both endpoints at a local mock server.
    pub fn with_base_urls(
        credentials: RedditCredentials,
        subreddit: impl Into<String>,
        user_agent: &str,
        auth_base: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, ForumError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| ForumError::Network(err.to_string()))?;
        Ok(Self {
            credentials,
            subreddit: subreddit.into(),
            auth_base: auth_base.into(),
            api_base: api_base.into(),
            http,
        })
    }
}

#[async_trait::async_trait]
impl ForumAuthenticator for RedditAuthenticator {
    async fn authenticate(&self) -> Result<Box<dyn ForumClient>, ForumError> {
        let response = self
            .http
            .post(format!("{}/api/v1/access_token", self.auth_base))
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.credentials.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForumError::Auth(format!("token endpoint returned {}", status)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| ForumError::Auth(err.to_string()))?;
        if let Some(error) = token.error {
            return Err(ForumError::Auth(error));
        }
        let access_token = token
            .access_token
            .ok_or_else(|| ForumError::Auth("token response had no access_token".into()))?;

        relay_debug!("Obtained bearer token for r/{}", self.subreddit);

        Ok(Box::new(RedditClient {
            http: self.http.clone(),
            api_base: self.api_base.clone(),
            subreddit: self.subreddit.clone(),
            access_token,
            read_only: false,
        }))
    }
}

/// Bearer-token client for one subreddit.
#[derive(Debug)]
pub struct RedditClient {
    http: reqwest::Client,
    api_base: String,
    subreddit: String,
    access_token: String,
    read_only: bool,
}

impl RedditClient {
    async fn get_listing(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<Vec<Submission>, ForumError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForumError::Http(status.as_u16()));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|err| ForumError::Api(err.to_string()))?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|thing| Submission {
                url: thing.data.url,
                title: thing.data.title,
                permalink: thing.data.permalink,
                id: thing.data.name,
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl ForumClient for RedditClient {
    async fn list_recent(&self, limit: u32) -> Result<Vec<Submission>, ForumError> {
        let limit = limit.to_string();
        self.get_listing(
            format!("{}/r/{}/new", self.api_base, self.subreddit),
            &[("limit", limit.as_str()), ("raw_json", "1")],
        )
        .await
    }

    async fn search(&self, query: &str) -> Result<Vec<Submission>, ForumError> {
        self.get_listing(
            format!("{}/r/{}/search", self.api_base, self.subreddit),
            &[
                ("q", query),
                ("sort", "new"),
                ("restrict_sr", "1"),
                ("raw_json", "1"),
            ],
        )
        .await
    }

    async fn submit(&self, title: &str, url: &str) -> Result<Submission, ForumError> {
        // The handle itself enforces dry-run mode, the same contract the
        // real site applies to read-only sessions.
        if self.read_only {
            return Err(ForumError::ReadOnly);
        }

        let response = self
            .http
            .post(format!("{}/api/submit", self.api_base))
            .bearer_auth(&self.access_token)
            .form(&[
                ("api_type", "json"),
                ("kind", "link"),
                ("sr", self.subreddit.as_str()),
                ("title", title),
                ("url", url),
            ])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForumError::Http(status.as_u16()));
        }

        let envelope: SubmitEnvelope = response
            .json()
            .await
            .map_err(|err| ForumError::Api(err.to_string()))?;
        if !envelope.json.errors.is_empty() {
            return Err(ForumError::Api(
                serde_json::to_string(&envelope.json.errors).unwrap_or_default(),
            ));
        }
        let data = envelope
            .json
            .data
            .ok_or_else(|| ForumError::Api("submit response had no data".into()))?;

        Ok(Submission {
            url: url.to_owned(),
            title: title.to_owned(),
            permalink: data.url.unwrap_or_default(),
            id: data.name.unwrap_or_default(),
        })
    }

    async fn distinguish(&self, id: &str) -> Result<(), ForumError> {
        let response = self
            .http
            .post(format!("{}/api/distinguish", self.api_base))
            .bearer_auth(&self.access_token)
            .form(&[
                ("api_type", "json"),
                ("id", id),
                ("how", "yes"),
                ("sticky", "false"),
            ])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForumError::Http(status.as_u16()));
        }
        Ok(())
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: LinkData,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LinkData {
    title: String,
    url: String,
    permalink: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SubmitEnvelope {
    json: SubmitBody,
}

#[derive(Debug, Deserialize)]
struct SubmitBody {
    #[serde(default)]
    errors: Vec<serde_json::Value>,
    data: Option<SubmitData>,
}

#[derive(Debug, Deserialize)]
struct SubmitData {
    url: Option<String>,
    name: Option<String>,
}
