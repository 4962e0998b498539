//! # Reddit Integration Module
//!
//! The rest of the crate talks to Reddit only through the two traits defined
//! here. [`Reddit`] hands out a [`Subreddit`] for a name without touching the
//! network, and a [`Subreddit`] performs one bounded listing request per
//! ranking. [`client::RedditClient`] is the HTTP implementation; tests swap in
//! an in-memory double.
//!
//! ## Error categories
//!
//! Every failure is a [`RedditError`]. Reddit reports API problems as a list
//! of `(error_type, message, field)` items; the tool only branches on a few
//! of those types:
//!
//! - `RATELIMIT` is retried with backoff (see [`crate::retry`]).
//! - `SUBREDDIT_NOEXIST` and `SUBREDDIT_NOTALLOWED` end the run with a
//!   "does not exist or is private" message.
//! - everything else ends the run with the list of items.
//!
//! Failures that never produced an API answer (DNS, TLS, connection resets,
//! undecodable bodies) are [`RedditError::Transport`].

pub mod auth;
pub mod client;
pub mod query;

use std::fmt;

use crate::types::{Submission, TimeFilterOption};

pub use client::RedditClient;
pub use query::{Query, select_query_function};

pub const RATELIMIT: &str = "RATELIMIT";
pub const SUBREDDIT_NOEXIST: &str = "SUBREDDIT_NOEXIST";
pub const SUBREDDIT_NOTALLOWED: &str = "SUBREDDIT_NOTALLOWED";

/// One entry of a Reddit API error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorItem {
    pub error_type: String,
    pub message: String,
    pub field: String,
}

impl ApiErrorItem {
    pub fn new(
        error_type: impl Into<String>,
        message: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
            field: field.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedditError {
    /// Reddit answered and reported one or more errors.
    Api(Vec<ApiErrorItem>),
    /// No usable answer was received.
    Transport(String),
}

impl RedditError {
    pub fn api(error_type: &str, message: &str) -> Self {
        RedditError::Api(vec![ApiErrorItem::new(error_type, message, "")])
    }

    fn has_error_type(&self, types: &[&str]) -> bool {
        match self {
            RedditError::Api(items) => items
                .iter()
                .any(|item| types.contains(&item.error_type.as_str())),
            RedditError::Transport(_) => false,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.has_error_type(&[RATELIMIT])
    }

    pub fn is_subreddit_missing(&self) -> bool {
        self.has_error_type(&[SUBREDDIT_NOEXIST, SUBREDDIT_NOTALLOWED])
    }

    /// `TYPE: message` pairs joined with `, `.
    pub fn details(&self) -> String {
        match self {
            RedditError::Api(items) => items
                .iter()
                .map(|item| format!("{}: {}", item.error_type, item.message))
                .collect::<Vec<_>>()
                .join(", "),
            RedditError::Transport(message) => message.clone(),
        }
    }
}

impl fmt::Display for RedditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.details())
    }
}

impl std::error::Error for RedditError {}

impl From<reqwest::Error> for RedditError {
    fn from(err: reqwest::Error) -> Self {
        RedditError::Transport(err.to_string())
    }
}

pub type Posts = Result<Vec<Submission>, RedditError>;

/// A named subreddit able to list its posts under each ranking.
#[allow(async_fn_in_trait)]
pub trait Subreddit {
    fn display_name(&self) -> &str;

    async fn controversial(&self, time_filter: TimeFilterOption, limit: u32) -> Posts;
    async fn gilded(&self, limit: u32) -> Posts;
    async fn hot(&self, limit: u32) -> Posts;
    async fn new(&self, limit: u32) -> Posts;
    async fn random_rising(&self, limit: u32) -> Posts;
    async fn rising(&self, limit: u32) -> Posts;
    async fn top(&self, time_filter: TimeFilterOption, limit: u32) -> Posts;
}

/// Entry point to the platform; resolving a subreddit does not fetch anything.
pub trait Reddit {
    type Subreddit<'a>: Subreddit
    where
        Self: 'a;

    fn subreddit<'a>(&'a self, name: &str) -> Result<Self::Subreddit<'a>, RedditError>;
}
