//! HTTP client for Reddit's OAuth API.

use reqwest::{Client, Response, StatusCode, header::LOCATION, redirect::Policy};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    Res,
    error::Error,
    management::TokenManager,
    types::{Credentials, Listing, Me, TimeFilterOption},
    utils,
};

use super::{
    ApiErrorItem, Posts, RATELIMIT, Reddit, RedditError, SUBREDDIT_NOEXIST, SUBREDDIT_NOTALLOWED,
    Subreddit,
};

/// Host that issues tokens.
pub const DEFAULT_AUTH_URL: &str = "https://www.reddit.com";
/// Host that serves authenticated API calls.
pub const DEFAULT_API_URL: &str = "https://oauth.reddit.com";

pub struct RedditClient {
    credentials: Credentials,
    http: Client,
    auth_url: String,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl RedditClient {
    pub fn new(credentials: Credentials) -> Res<Self> {
        Self::with_base_urls(credentials, DEFAULT_AUTH_URL, DEFAULT_API_URL)
    }

    /// Client talking to custom hosts, e.g. a local mock server.
    pub fn with_base_urls(
        credentials: Credentials,
        auth_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Res<Self> {
        // Reddit answers unknown subreddits with a redirect to the search
        // page; it is only detectable when redirects are not followed.
        let http = Client::builder()
            .user_agent(credentials.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|e| Error::Communication(e.to_string()))?;

        Ok(Self {
            credentials,
            http,
            auth_url: auth_url.into(),
            api_url: api_url.into(),
            tokens: Mutex::new(TokenManager::default()),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    async fn bearer(&self) -> Result<String, RedditError> {
        let mut tokens = self.tokens.lock().await;
        tokens
            .get_valid_token(&self.http, &self.auth_url, &self.credentials)
            .await
    }

    async fn send_get(&self, path: &str, query: &[(&str, String)]) -> Result<Response, RedditError> {
        let token = self.bearer().await?;
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        Ok(response)
    }

    /// The account the legacy password grant logged in as.
    pub async fn me(&self) -> Result<Me, RedditError> {
        let response = self.send_get("api/v1/me", &[]).await?;
        let body = read_json(response).await?;
        serde_json::from_value(body)
            .map_err(|e| RedditError::Transport(format!("unexpected /api/v1/me response: {e}")))
    }

    async fn listing(
        &self,
        subreddit: &str,
        sort: &str,
        time_filter: Option<TimeFilterOption>,
        limit: u32,
    ) -> Posts {
        let mut query = vec![("limit", limit.to_string()), ("raw_json", "1".to_string())];
        if let Some(t) = time_filter {
            query.push(("t", t.as_str().to_string()));
        }

        let response = self
            .send_get(&format!("r/{subreddit}/{sort}"), &query)
            .await?;
        let body = read_json(check_subreddit_status(response)?).await?;
        let listing: Listing = serde_json::from_value(body)
            .map_err(|e| RedditError::Transport(format!("unexpected listing format: {e}")))?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|thing| thing.data)
            .collect())
    }
}

/// A subreddit resolved through [`RedditClient`]; no request is made until a
/// listing is asked for.
pub struct RedditSubreddit<'c> {
    client: &'c RedditClient,
    name: String,
}

impl Subreddit for RedditSubreddit<'_> {
    fn display_name(&self) -> &str {
        &self.name
    }

    async fn controversial(&self, time_filter: TimeFilterOption, limit: u32) -> Posts {
        self.client
            .listing(&self.name, "controversial", Some(time_filter), limit)
            .await
    }

    async fn gilded(&self, limit: u32) -> Posts {
        self.client.listing(&self.name, "gilded", None, limit).await
    }

    async fn hot(&self, limit: u32) -> Posts {
        self.client.listing(&self.name, "hot", None, limit).await
    }

    async fn new(&self, limit: u32) -> Posts {
        self.client.listing(&self.name, "new", None, limit).await
    }

    async fn random_rising(&self, limit: u32) -> Posts {
        self.client
            .listing(&self.name, "randomrising", None, limit)
            .await
    }

    async fn rising(&self, limit: u32) -> Posts {
        self.client.listing(&self.name, "rising", None, limit).await
    }

    async fn top(&self, time_filter: TimeFilterOption, limit: u32) -> Posts {
        self.client
            .listing(&self.name, "top", Some(time_filter), limit)
            .await
    }
}

impl Reddit for RedditClient {
    type Subreddit<'a>
        = RedditSubreddit<'a>
    where
        Self: 'a;

    fn subreddit<'a>(&'a self, name: &str) -> Result<RedditSubreddit<'a>, RedditError> {
        let name = utils::subreddit_name(name);
        if name.is_empty() {
            return Err(RedditError::api(SUBREDDIT_NOEXIST, "Subreddit name is empty"));
        }
        Ok(RedditSubreddit {
            client: self,
            name: name.to_string(),
        })
    }
}

/// Maps the ways Reddit says a subreddit cannot be listed.
fn check_subreddit_status(response: Response) -> Result<Response, RedditError> {
    let status = response.status();
    if status.is_redirection() {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|l| l.to_str().ok())
            .unwrap_or_default();
        if location.contains("/subreddits/search") {
            return Err(RedditError::api(SUBREDDIT_NOEXIST, "Subreddit not found"));
        }
    }

    match status {
        StatusCode::NOT_FOUND => Err(RedditError::api(SUBREDDIT_NOEXIST, "Subreddit not found")),
        StatusCode::FORBIDDEN => Err(RedditError::api(
            SUBREDDIT_NOTALLOWED,
            "Subreddit is private",
        )),
        _ => Ok(response),
    }
}

async fn read_json(response: Response) -> Result<Value, RedditError> {
    let body: Value = check_response(response).await?.json().await?;
    match embedded_errors(&body) {
        Some(items) => Err(RedditError::Api(items)),
        None => Ok(body),
    }
}

/// Turns any other non-success status into a [`RedditError`].
pub(crate) async fn check_response(response: Response) -> Result<Response, RedditError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(RedditError::api(RATELIMIT, "You are doing that too much"));
    }

    let body = response.text().await.unwrap_or_default();
    let items = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| embedded_errors(&value));

    Err(RedditError::Api(items.unwrap_or_else(|| {
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("unexpected status").to_string()
        } else {
            body.trim().to_string()
        };
        vec![ApiErrorItem::new(
            format!("HTTP_{}", status.as_u16()),
            message,
            "",
        )]
    })))
}

/// Error items of a `{"json": {"errors": [...]}}` body, `None` when there are none.
fn embedded_errors(body: &Value) -> Option<Vec<ApiErrorItem>> {
    let errors = body.get("json")?.get("errors")?.as_array()?;
    let items: Vec<ApiErrorItem> = errors
        .iter()
        .map(|entry| {
            let part = |i: usize| {
                entry
                    .get(i)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            ApiErrorItem::new(part(0), part(1), part(2))
        })
        .collect();
    (!items.is_empty()).then_some(items)
}
