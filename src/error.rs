//! Error types for reddit-get.
//!
//! Every failure the tool can report is a variant of [`Error`]. The command
//! line front end prints the message and exits with status 255, so the
//! `Display` text of each variant is what the user sees.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by reddit-get operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The sorting option is not one of the known tokens.
    #[error("{0} is not a valid sorting option.")]
    InvalidSortMode(String),

    /// The time filter is not one of the known tokens.
    #[error("{0} is not a valid time filter option")]
    InvalidTimeRangeMode(String),

    /// The requested number of posts is outside 1..=25.
    #[error("You may only get between 1 and 25 submissions (got {0})")]
    InvalidLimit(i64),

    /// The header template uses placeholders other than sorting, time and subreddit.
    #[error("Invalid keys passed into header template: {0}")]
    InvalidTemplateKey(String),

    /// The post template has nothing to substitute.
    #[error("Your post output template did not have any items to be printed")]
    EmptyOutputTemplate,

    /// A post template asked for a field the post does not have.
    #[error("Post has no field named '{0}'")]
    MissingField(String),

    /// The template has an unmatched brace.
    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    /// Neither credentials in the environment nor a config file were found.
    #[error(
        "No valid TOML config found at {} and required environment variables not set. \
         Either create a config file or set REDDIT_CLIENT_ID, REDDIT_CLIENT_SECRET, and \
         REDDIT_USER_AGENT environment variables.",
        .0.display()
    )]
    ConfigNotFound(PathBuf),

    /// The config file is not valid TOML.
    #[error("Invalid TOML syntax in config file {}: {source}", path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The config file has no `[reddit-get]` table.
    #[error("Config file {} missing [reddit-get] section", .0.display())]
    MissingSection(PathBuf),

    /// The `[reddit-get]` table lacks required keys.
    #[error("Config file {} missing required keys: {keys}", path.display())]
    MissingKeys { path: PathBuf, keys: String },

    /// Legacy username/password authentication was rejected.
    #[error("Failed to authenticate with Reddit. Check your username and password. ({0})")]
    Authentication(String),

    /// The subreddit does not exist or cannot be read.
    #[error("Subreddit 'r/{0}' does not exist or is private/restricted")]
    FeedNotFound(String),

    /// Rate limited on every attempt.
    #[error(
        "Reddit API rate limit exceeded. Please wait a minute and try again. \
         Consider reducing the number of requests or using a higher tier API key."
    )]
    RateLimitExceeded,

    /// Reddit answered with an error that is not worth retrying.
    #[error("Reddit API error: {0}")]
    Api(String),

    /// The request never got a usable answer.
    #[error("Error communicating with Reddit: {0}")]
    Communication(String),

    /// The retry loop ran out without producing a result.
    #[error("Maximum retry attempts exceeded")]
    RetryExhausted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
