//! # CLI Module
//!
//! The operations behind the `reddit-get` subcommands. [`RedditCli`] is built
//! once per process from the resolved credentials and then serves exactly one
//! operation:
//!
//! - [`RedditCli::post`] - fetch and render posts of one subreddit
//! - [`RedditCli::config_location`] - absolute path of the credentials file
//!
//! ## Data Flow
//!
//! ```text
//! options ─► validate limit / sorting / time filter
//!         ─► resolve subreddit handle (no network)
//!         ─► select listing ─► retry executor ─► Reddit
//!         ─► header template + post template
//!         ─► [header, post, post, ...]
//! ```
//!
//! `RedditCli` is generic over the [`Reddit`] capability so the whole flow
//! runs against an in-memory double in tests.
//!
//! ## Usage Patterns
//!
//! ```bash
//! reddit-get post showerthoughts --post-sorting hot --limit 5
//! reddit-get post news --time-filter day --noheader --output-format "* {title} ({url})"
//! reddit-get config-location
//! ```

mod config;
mod post;

use std::path::PathBuf;

pub use post::PostOptions;

use crate::{
    Res,
    error::Error,
    success,
    reddit::{Reddit, RedditClient},
    retry::RetryPolicy,
    types::Credentials,
};

pub struct RedditCli<R = RedditClient> {
    config_path: PathBuf,
    reddit: R,
    retry_policy: RetryPolicy,
}

impl<R: Reddit> RedditCli<R> {
    pub fn new(config_path: PathBuf, reddit: R) -> Self {
        Self {
            config_path,
            reddit,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn reddit(&self) -> &R {
        &self.reddit
    }
}

impl RedditCli<RedditClient> {
    /// Resolves credentials for `config` and builds the HTTP client.
    ///
    /// With legacy username/password credentials the login is checked right
    /// away; read-only credentials are only exercised by the first listing.
    pub async fn connect(config: &str) -> Res<Self> {
        let (config_path, credentials) = Credentials::load(config).await?;
        let reddit = RedditClient::new(credentials)?;

        if reddit.credentials().has_user_auth() {
            let me = reddit
                .me()
                .await
                .map_err(|e| Error::Authentication(e.details()))?;
            success!("Logged in as u/{}", me.name);
        }

        Ok(Self::new(config_path, reddit))
    }
}
